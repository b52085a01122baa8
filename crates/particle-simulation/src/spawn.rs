//! Star factory

use particle_physics::{
    Color, Particle, Viewport, ANGULAR_SPEED_SCALE, INITIAL_DISK_DIVISOR, RESPAWN_SPREAD,
    STAR_RADIUS_MAX, STAR_RADIUS_MIN,
};
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Where a new star comes from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnKind {
    /// Part of the starting disk, anywhere across the field
    Initial,
    /// Replacement for an absorbed star, placed beyond the field corners
    Respawn,
}

/// Create a star with randomized orbit parameters.
pub fn spawn<R: Rng>(
    rng: &mut R,
    viewport: &Viewport,
    kind: SpawnKind,
    id: u64,
) -> Particle {
    let radius = sample_below(rng, STAR_RADIUS_MIN, STAR_RADIUS_MAX);
    let angle = sample_below(rng, 0.0, TAU);

    let orbit_radius = match kind {
        SpawnKind::Initial => {
            let disk = (viewport.width + viewport.height) / INITIAL_DISK_DIVISOR;
            sample_below(rng, 0.0, disk)
        }
        SpawnKind::Respawn => {
            viewport.origin_distance() + sample_below(rng, 0.0, RESPAWN_SPREAD)
        }
    };

    // Farther stars get a tighter bound on angular speed
    let speed_bound = ANGULAR_SPEED_SCALE * PI / orbit_radius;
    let angular_speed = if speed_bound.is_finite() {
        rng.random::<f32>() * speed_bound
    } else {
        0.0
    };

    Particle {
        id,
        position: viewport.center(),
        radius,
        color: Color::WHITE,
        angle,
        orbit_radius,
        angular_speed,
        acceleration: 0.0,
    }
}

/// Uniform sample in `[low, high)`.
///
/// Float range sampling can round up onto `high`; those draws are rejected.
fn sample_below<R: Rng>(rng: &mut R, low: f32, high: f32) -> f32 {
    if high <= low {
        return low;
    }
    loop {
        let value = rng.random_range(low..high);
        if value < high {
            return value;
        }
    }
}
