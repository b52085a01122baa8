//! Physical and visual constants for the accretion simulation
//!
//! Values are tuned for a pixel-space visualization, not for physical
//! accuracy. Distances are logical pixels, time is one frame.

use std::f32::consts::PI;

/// Gravitational constant used for the radial decay term
pub const G: f32 = 0.05;

/// Constant inward drift added to every particle each tick.
/// Keeps far particles from stalling on a fixed orbit.
pub const DECAY_FLOOR: f32 = 0.1;

/// Star size range (draw side length and absorbed mass)
pub const STAR_RADIUS_MIN: f32 = 0.5;
pub const STAR_RADIUS_MAX: f32 = 2.5;

/// Scales the upper bound of angular speed: `ANGULAR_SPEED_SCALE * PI / orbit_radius`
pub const ANGULAR_SPEED_SCALE: f32 = 0.3;

/// Respawned stars land up to this far beyond the field corner
pub const RESPAWN_SPREAD: f32 = 200.0;

/// Initial disk spans `(width + height) / INITIAL_DISK_DIVISOR`
pub const INITIAL_DISK_DIVISOR: f32 = 3.0;

/// Attractor radius at startup
pub const ATTRACTOR_INITIAL_RADIUS: f32 = 100.0;

/// Offset added to the mass-derived attractor radius
pub const ATTRACTOR_BASE_RADIUS: f32 = 75.0;

/// Radius cap is `(physical_width + physical_height) / RADIUS_CAP_DIVISOR`
pub const RADIUS_CAP_DIVISOR: f32 = 10.0;

/// Glow blur is this multiple of the attractor radius
pub const GLOW_SCALE: f32 = 1.5;

/// Distance over which star color fades from the attractor edge
pub const COLOR_FALLOFF: f32 = 200.0;

/// Fixed red channel of star color (0-255 scale)
pub const STAR_RED: f32 = 111.0;

/// Orbit radii at or below this are treated as absorbed.
/// Guards the inverse-square term against division by ~0.
pub const MIN_ORBIT_RADIUS: f32 = 1.0e-3;

/// Default star population
pub const STAR_COUNT: usize = 5000;

/// Sphere volume for a given radius
#[inline]
pub fn sphere_volume(radius: f32) -> f32 {
    (4.0 / 3.0) * PI * radius * radius * radius
}
