//! Star state and per-tick orbital kinematics

use crate::color::Color;
use crate::constants::{DECAY_FLOOR, G, MIN_ORBIT_RADIUS};
use glam::Vec2;

/// One star orbiting the attractor.
///
/// `position`, `color` and `acceleration` are derived from the orbit every
/// tick; only `angle` and `orbit_radius` carry state between ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Identity, unique within a simulation run
    pub id: u64,
    /// Screen position (logical pixels)
    pub position: Vec2,
    /// Draw size and absorbed mass
    pub radius: f32,
    pub color: Color,
    /// Orbital phase in radians, grows without wrapping
    pub angle: f32,
    /// Distance from the attractor center
    pub orbit_radius: f32,
    pub angular_speed: f32,
    /// Radial decay applied on the last tick
    pub acceleration: f32,
}

/// Inputs every particle reads from the attractor during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pull {
    pub center: Vec2,
    pub radius: f32,
    pub volume: f32,
}

/// Outcome of advancing one particle by one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fate {
    Orbiting,
    Absorbed,
}

impl Particle {
    /// Radial decay for a star of `radius` at `orbit_radius` from an
    /// attractor of `volume`: `G * r * V / d^2 + DECAY_FLOOR`
    pub fn decay(radius: f32, volume: f32, orbit_radius: f32) -> f32 {
        G * radius * volume / (orbit_radius * orbit_radius) + DECAY_FLOOR
    }

    /// Advance this particle one tick toward the attractor.
    ///
    /// Position is projected from the orbit before the angle advances, so the
    /// position lags the angle by one step. Returns [`Fate::Absorbed`] when
    /// the orbit started the tick inside the attractor; the orbit radius is
    /// then left untouched.
    pub fn advance(&mut self, pull: &Pull) -> Fate {
        if !self.orbit_radius.is_finite() || self.orbit_radius <= MIN_ORBIT_RADIUS {
            return Fate::Absorbed;
        }

        self.position = pull.center + self.orbit_radius * Vec2::from_angle(self.angle);
        self.angle += self.angular_speed;
        self.acceleration = Self::decay(self.radius, pull.volume, self.orbit_radius);
        self.color = Color::star_tint(self.orbit_radius - pull.radius);

        if self.orbit_radius >= pull.radius {
            self.orbit_radius -= self.acceleration;
            Fate::Orbiting
        } else {
            Fate::Absorbed
        }
    }
}
