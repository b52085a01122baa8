//! The central absorbing body

use crate::constants::{sphere_volume, ATTRACTOR_BASE_RADIUS, ATTRACTOR_INITIAL_RADIUS};
use std::f32::consts::PI;

/// Black hole at the viewport center.
///
/// Radius only ever grows. Growth is driven by `added_mass` and saturates
/// once the radius exceeds the viewport-derived cap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attractor {
    pub radius: f32,
    /// Total radius of absorbed stars. Kept in f64 so small stars still
    /// register on a long-running accumulator.
    pub added_mass: f64,
}

impl Default for Attractor {
    fn default() -> Self {
        Self::new(ATTRACTOR_INITIAL_RADIUS)
    }
}

impl Attractor {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            added_mass: 0.0,
        }
    }

    pub fn volume(&self) -> f32 {
        sphere_volume(self.radius)
    }

    /// Accrue the mass of an absorbed star
    pub fn absorb(&mut self, mass: f32) {
        if mass > 0.0 {
            self.added_mass += f64::from(mass);
        }
    }

    /// Radius implied by the accumulated mass: `2 * sqrt(m / PI) + 75`
    pub fn mass_radius(added_mass: f64) -> f32 {
        (2.0 * (added_mass / std::f64::consts::PI).sqrt()) as f32 + ATTRACTOR_BASE_RADIUS
    }

    /// Apply the growth rule and return the new radius.
    ///
    /// Only applies while the radius is at or below `radius_cap`; once it
    /// has passed the cap the radius is frozen for good, even as mass keeps
    /// accruing.
    pub fn grow(&mut self, radius_cap: f32) -> f32 {
        if self.radius <= radius_cap {
            self.radius = self.radius.max(Self::mass_radius(self.added_mass));
        }
        self.radius
    }

    pub fn is_saturated(&self, radius_cap: f32) -> bool {
        self.radius > radius_cap
    }
}
