//! CPU-side shape batch recorded through the [`Canvas`] interface

use crate::canvas::{Canvas, Shadow};
use glam::Vec2;
use particle_physics::Color;

/// Shape kinds understood by the SDF fragment shader
pub const SHAPE_RECT: u32 = 0;
pub const SHAPE_CIRCLE: u32 = 1;

/// Glow falloff is a Gaussian with `sigma = blur / 2`; the quad covers four
/// sigma past the edge, where the falloff is under 1e-3 and gets discarded.
pub const GLOW_EXTENT_PER_BLUR: f32 = 2.0;

/// Instance data for SDF-based shape rendering.
///
/// Each instance is one rectangle or circle, expanded to a quad in the vertex
/// shader and shaded with a signed distance field.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeInstance {
    /// Center position in logical pixels
    pub center: [f32; 2],
    /// Half-size; for circles `x` is the radius
    pub half_size: [f32; 2],
    /// Fill color (sRGB, 0-255)
    pub color: [u8; 4],
    /// Glow color (sRGB, 0-255)
    pub shadow_color: [u8; 4],
    /// Glow blur radius in logical pixels (0 = no glow)
    pub shadow_blur: f32,
    /// `SHAPE_RECT` or `SHAPE_CIRCLE`
    pub kind: u32,
    /// How far the quad reaches past the shape edge for the glow
    pub shadow_extent: f32,
}

impl ShapeInstance {
    pub fn rect(origin: Vec2, size: Vec2, color: Color) -> Self {
        let half = size * 0.5;
        Self {
            center: (origin + half).to_array(),
            half_size: half.to_array(),
            color: color.to_rgba8(),
            shadow_color: [0; 4],
            shadow_blur: 0.0,
            kind: SHAPE_RECT,
            shadow_extent: 0.0,
        }
    }

    pub fn circle(center: Vec2, radius: f32, color: Color, shadow: Option<Shadow>) -> Self {
        let (shadow_color, shadow_blur) = match shadow {
            Some(shadow) => (shadow.color.to_rgba8(), shadow.blur.max(0.0)),
            None => ([0; 4], 0.0),
        };

        Self {
            center: center.to_array(),
            half_size: [radius, radius],
            color: color.to_rgba8(),
            shadow_color,
            shadow_blur,
            kind: SHAPE_CIRCLE,
            shadow_extent: shadow_blur * GLOW_EXTENT_PER_BLUR,
        }
    }

    /// Vertex buffer layout for instance attributes
    pub const fn desc() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: &[wgpu::VertexAttribute] = &wgpu::vertex_attr_array![
            0 => Float32x2, // center
            1 => Float32x2, // half_size
            2 => Unorm8x4,  // color
            3 => Unorm8x4,  // shadow_color
            4 => Float32,   // shadow_blur
            5 => Uint32,    // kind
            6 => Float32,   // shadow_extent
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ShapeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: ATTRIBUTES,
        }
    }
}

/// Shapes for one frame, in draw order.
///
/// `fill` paints over everything, so it drops the shapes recorded so far and
/// becomes the render pass clear color.
#[derive(Clone, Debug)]
pub struct ShapeBatch {
    clear_color: Color,
    pixel_ratio: f32,
    instances: Vec<ShapeInstance>,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl ShapeBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            clear_color: Color::WHITE,
            pixel_ratio: 1.0,
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    pub fn instances(&self) -> &[ShapeInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl Canvas for ShapeBatch {
    fn set_scale(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio;
    }

    fn fill(&mut self, color: Color) {
        self.instances.clear();
        self.clear_color = color;
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Color) {
        self.instances.push(ShapeInstance::rect(origin, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, shadow: Option<Shadow>) {
        self.instances
            .push(ShapeInstance::circle(center, radius, color, shadow));
    }
}
