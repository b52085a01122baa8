//! Startup parameters for a simulation run

use particle_physics::{Viewport, ATTRACTOR_INITIAL_RADIUS, STAR_COUNT};

/// Fixed at startup; nothing here changes while the simulation runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Star population, conserved for the whole run
    pub particle_count: usize,
    /// Seed for a reproducible run, `None` seeds from the OS
    pub seed: Option<u64>,
    pub attractor_radius: f32,
    pub viewport: Viewport,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: STAR_COUNT,
            seed: None,
            attractor_radius: ATTRACTOR_INITIAL_RADIUS,
            viewport: Viewport::default(),
        }
    }
}

impl SimulationConfig {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_attractor_radius(mut self, radius: f32) -> Self {
        self.attractor_radius = radius;
        self
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}
