//! Drawing surface geometry

use crate::constants::RADIUS_CAP_DIVISOR;
use crate::particle::Particle;
use glam::Vec2;

/// Logical size and pixel ratio of the drawing surface.
///
/// All simulation geometry is in logical pixels; the renderer scales by
/// `pixel_ratio`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub pixel_ratio: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

impl Viewport {
    /// Sizes are clamped to at least one pixel; a bad pixel ratio becomes 1.
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };

        Self {
            width: sanitize_extent(width),
            height: sanitize_extent(height),
            pixel_ratio,
        }
    }

    /// Build from a physical surface size (e.g. a window's inner size)
    pub fn from_physical(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let ratio = Self::new(1.0, 1.0, pixel_ratio).pixel_ratio;
        Self::new(width as f32 / ratio, height as f32 / ratio, ratio)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }

    pub fn physical_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * self.pixel_ratio
    }

    /// Attractor growth stops once its radius exceeds this
    pub fn radius_cap(&self) -> f32 {
        let physical = self.physical_size();
        (physical.x + physical.y) / RADIUS_CAP_DIVISOR
    }

    /// Distance from the center to the surface origin (half the diagonal)
    pub fn origin_distance(&self) -> f32 {
        self.center().length()
    }

    /// False only when the star's draw square lies entirely off one edge.
    /// Touching an edge counts as visible.
    pub fn is_visible(&self, particle: &Particle) -> bool {
        let min = particle.position;
        let max = particle.position + Vec2::splat(particle.radius);

        !(min.x > self.width || max.x < 0.0 || min.y > self.height || max.y < 0.0)
    }
}

fn sanitize_extent(extent: f32) -> f32 {
    if extent.is_finite() {
        extent.max(1.0)
    } else {
        1.0
    }
}
