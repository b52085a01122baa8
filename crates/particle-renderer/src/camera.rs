//! Screen-space camera for 2D drawing

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Camera uniform for GPU
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Physical pixels per logical pixel, used for edge antialiasing
    pub pixel_ratio: f32,
    pub _padding: [f32; 3],
}

/// Maps logical pixel coordinates (origin top-left, y down) to clip space.
///
/// The framebuffer is `size * pixel_ratio` physical pixels, so projecting the
/// logical rectangle onto it is the high-density scaling transform.
pub struct Camera {
    pub size: Vec2,
    pub pixel_ratio: f32,
}

impl Camera {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        Self {
            size: Vec2::new(width.max(1.0), height.max(1.0)),
            pixel_ratio: pixel_ratio.max(f32::EPSILON),
        }
    }

    /// Camera for a physical surface drawn at `pixel_ratio`
    pub fn from_physical(width: u32, height: u32, pixel_ratio: f32) -> Self {
        let ratio = pixel_ratio.max(f32::EPSILON);
        Self::new(width as f32 / ratio, height as f32 / ratio, ratio)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(0.0, self.size.x, self.size.y, 0.0, -1.0, 1.0)
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.build_view_projection_matrix().to_cols_array_2d(),
            pixel_ratio: self.pixel_ratio,
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    /// Logical point to normalized device coordinates
    fn project(camera: &Camera, point: Vec2) -> Vec2 {
        let clip = camera.build_view_projection_matrix() * Vec4::new(point.x, point.y, 0.0, 1.0);
        Vec2::new(clip.x, clip.y) / clip.w
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_corners_map_to_clip_space() {
        let camera = Camera::new(800.0, 600.0, 1.0);
        assert!(close(project(&camera, Vec2::ZERO), Vec2::new(-1.0, 1.0)));
        assert!(close(project(&camera, Vec2::new(800.0, 600.0)), Vec2::new(1.0, -1.0)));
        assert!(close(project(&camera, Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn test_from_physical_divides_by_ratio() {
        let camera = Camera::from_physical(1600, 1200, 2.0);
        assert_eq!(camera.size, Vec2::new(800.0, 600.0));
        // Logical center stays the clip-space center on a dense display
        assert!(close(project(&camera, Vec2::new(400.0, 300.0)), Vec2::ZERO));
    }

    #[test]
    fn test_uniform_size() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
        assert_eq!(Camera::new(10.0, 10.0, 3.0).to_uniform().pixel_ratio, 3.0);
    }
}
