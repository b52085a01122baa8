//! Immediate-mode 2D drawing surface

use glam::Vec2;
use particle_physics::Color;

/// Soft glow drawn beneath a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in logical pixels
    pub blur: f32,
}

/// A surface the scene can be drawn onto.
///
/// Coordinates are logical pixels with the origin at the top-left corner.
/// `set_scale` sets how many physical pixels make up one logical pixel.
pub trait Canvas {
    fn set_scale(&mut self, pixel_ratio: f32);

    /// Paint the whole surface with one color
    fn fill(&mut self, color: Color);

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, shadow: Option<Shadow>);
}
