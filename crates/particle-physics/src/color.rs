//! Colors on the 0-255 channel scale with a 0-1 alpha

use crate::constants::{COLOR_FALLOFF, STAR_RED};

/// RGBA color. Channels are on the 0-255 scale and are NOT clamped,
/// alpha is 0-1. Clamping happens when converting to 8-bit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255.0, 255.0, 255.0);

    /// Glow color of the attractor (`#111`)
    pub const SHADOW: Self = Self::rgb(17.0, 17.0, 17.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Star tint for a star `distance` pixels outside the attractor edge.
    ///
    /// Green and blue ramp from 0 at the edge to 255 at [`COLOR_FALLOFF`],
    /// so stars redden as they approach the attractor. Values past either
    /// end are kept as-is.
    pub fn star_tint(distance: f32) -> Self {
        let channel = (255.0 * (distance / COLOR_FALLOFF)).round();
        Self::rgb(STAR_RED, channel, channel)
    }

    /// Convert to 8-bit RGBA, clamping every channel
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
            (self.a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Convert to linear-space floats for a GPU clear color
    pub fn to_linear(self) -> [f64; 4] {
        fn srgb_to_linear(c: f32) -> f64 {
            let x = (c.clamp(0.0, 255.0) / 255.0) as f64;
            if x <= 0.04045 {
                x / 12.92
            } else {
                ((x + 0.055) / 1.055).powf(2.4)
            }
        }

        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a.clamp(0.0, 1.0) as f64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_tint_ramp() {
        assert_eq!(Color::star_tint(0.0), Color::rgb(111.0, 0.0, 0.0));
        assert_eq!(Color::star_tint(100.0), Color::rgb(111.0, 128.0, 128.0));
        assert_eq!(Color::star_tint(200.0), Color::rgb(111.0, 255.0, 255.0));
    }

    #[test]
    fn test_star_tint_keeps_out_of_range() {
        let far = Color::star_tint(400.0);
        assert_eq!(far.g, 510.0);

        let inside = Color::star_tint(-40.0);
        assert_eq!(inside.g, -51.0);
    }

    #[test]
    fn test_rgba8_clamps() {
        assert_eq!(Color::star_tint(400.0).to_rgba8(), [111, 255, 255, 255]);
        assert_eq!(Color::star_tint(-40.0).to_rgba8(), [111, 0, 0, 255]);
        assert_eq!(Color::SHADOW.to_rgba8(), [17, 17, 17, 255]);
    }

    #[test]
    fn test_linear_endpoints() {
        for channel in Color::WHITE.to_linear() {
            assert!((channel - 1.0).abs() < 1e-9);
        }
        assert_eq!(Color::rgb(0.0, 0.0, 0.0).to_linear(), [0.0, 0.0, 0.0, 1.0]);
    }
}
