//! # Accretion Physics
//!
//! Orbital-decay kinematics for stars falling into a growing black hole,
//! plus the attractor growth rule and drawing surface geometry.

pub mod attractor;
pub mod color;
pub mod constants;
pub mod particle;
pub mod viewport;

pub use attractor::*;
pub use color::*;
pub use constants::*;
pub use particle::*;
pub use viewport::*;
