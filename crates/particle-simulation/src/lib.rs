//! # Accretion Simulation
//!
//! Owns the star population and the attractor, and advances them one tick at
//! a time. Absorbed stars are replaced immediately so the population never
//! changes size.

pub mod config;
pub mod simulation;
pub mod spawn;

pub use config::*;
pub use simulation::*;
pub use spawn::*;
