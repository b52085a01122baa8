//! # Black Hole
//!
//! Frame loop, GPU surface and errors for the accretion visualizer. The
//! physics, simulation and drawing live in the `particle-*` crates.

pub mod driver;
pub mod error;
pub mod gpu;

pub use driver::*;
pub use error::*;
