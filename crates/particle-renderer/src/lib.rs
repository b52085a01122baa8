//! # Accretion Renderer
//!
//! Draws the scene through the [`Canvas`] trait. The wgpu backend records a
//! frame into a [`ShapeBatch`] and draws it with [`ShapeRenderer`].

pub mod camera;
pub mod canvas;
pub mod renderer;
pub mod scene;
pub mod shapes;

pub use camera::*;
pub use canvas::*;
pub use renderer::*;
pub use scene::*;
pub use shapes::*;
