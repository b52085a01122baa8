//! Simulation state and the per-tick update pass
//!
//! A tick visits every star present at its start exactly once. Absorbed stars
//! are dropped in place with `retain_mut` and their replacements are appended
//! after the pass, so removal never shifts an unvisited star past the cursor.

use crate::config::SimulationConfig;
use crate::spawn::{spawn, SpawnKind};
use particle_physics::{Attractor, Fate, Particle, Pull, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StepReport {
    /// Stars absorbed (and respawned) this tick
    pub absorbed: usize,
    /// Mass handed to the attractor this tick
    pub added_mass: f32,
}

/// Stars, attractor and viewport for one run
pub struct Simulation {
    particles: Vec<Particle>,
    attractor: Attractor,
    viewport: Viewport,
    rng: StdRng,
    next_id: u64,
    total_absorbed: u64,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut simulation = Self {
            particles: Vec::with_capacity(config.particle_count),
            attractor: Attractor::new(config.attractor_radius),
            viewport: config.viewport,
            rng,
            next_id: 0,
            total_absorbed: 0,
        };

        for _ in 0..config.particle_count {
            let particle = simulation.spawn(SpawnKind::Initial);
            simulation.particles.push(particle);
        }

        log::info!(
            "✓ Spawned {} stars around an attractor of radius {:.1}",
            simulation.particles.len(),
            simulation.attractor.radius
        );

        simulation
    }

    /// Start from an explicit population, e.g. a hand-built scenario.
    /// Respawns draw from an RNG seeded with `seed`.
    pub fn from_parts(
        particles: Vec<Particle>,
        attractor: Attractor,
        viewport: Viewport,
        seed: u64,
    ) -> Self {
        let next_id = particles.iter().map(|p| p.id + 1).max().unwrap_or(0);

        Self {
            particles,
            attractor,
            viewport,
            rng: StdRng::seed_from_u64(seed),
            next_id,
            total_absorbed: 0,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn attractor(&self) -> &Attractor {
        &self.attractor
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Stars absorbed since the run started
    pub fn total_absorbed(&self) -> u64 {
        self.total_absorbed
    }

    /// Replace the viewport. Stars keep their orbits; ones now off-surface
    /// are only skipped when drawing.
    pub fn resize(&mut self, viewport: Viewport) {
        log::debug!(
            "Viewport resized to {:.0}x{:.0} @{:.2}x (radius cap {:.1})",
            viewport.width,
            viewport.height,
            viewport.pixel_ratio,
            viewport.radius_cap()
        );
        self.viewport = viewport;
    }

    /// Advance every star by one tick.
    ///
    /// `observe` sees each star just before it is updated, which is when the
    /// frame draws it. Absorbed stars feed the attractor and are replaced by
    /// respawned ones before this returns. The attractor radius is not
    /// touched; see [`Simulation::grow_attractor`].
    pub fn step<F: FnMut(&Particle)>(&mut self, mut observe: F) -> StepReport {
        let pull = Pull {
            center: self.viewport.center(),
            radius: self.attractor.radius,
            volume: self.attractor.volume(),
        };

        let attractor = &mut self.attractor;
        let mut report = StepReport::default();

        self.particles.retain_mut(|particle| {
            observe(particle);
            match particle.advance(&pull) {
                Fate::Orbiting => true,
                Fate::Absorbed => {
                    attractor.absorb(particle.radius);
                    report.absorbed += 1;
                    report.added_mass += particle.radius;
                    false
                }
            }
        });

        for _ in 0..report.absorbed {
            let particle = self.spawn(SpawnKind::Respawn);
            self.particles.push(particle);
        }

        if report.absorbed > 0 {
            self.total_absorbed += report.absorbed as u64;
            log::trace!(
                "Absorbed {} stars (+{:.2} mass)",
                report.absorbed,
                report.added_mass
            );
        }

        report
    }

    /// Apply the growth rule against the current viewport cap
    pub fn grow_attractor(&mut self) -> f32 {
        let cap = self.viewport.radius_cap();
        let was_saturated = self.attractor.is_saturated(cap);
        let radius = self.attractor.grow(cap);

        if !was_saturated && self.attractor.is_saturated(cap) {
            log::info!(
                "Attractor saturated at radius {:.1} (cap {:.1}, mass {:.1})",
                radius,
                cap,
                self.attractor.added_mass
            );
        }

        radius
    }

    /// Step then grow, without drawing anything
    pub fn tick(&mut self) -> StepReport {
        let report = self.step(|_| {});
        self.grow_attractor();
        report
    }

    fn spawn(&mut self, kind: SpawnKind) -> Particle {
        let id = self.next_id;
        self.next_id += 1;
        spawn(&mut self.rng, &self.viewport, kind, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use particle_physics::Color;
    use std::collections::HashSet;

    fn star(id: u64, orbit_radius: f32, radius: f32) -> Particle {
        Particle {
            id,
            position: Vec2::ZERO,
            radius,
            color: Color::WHITE,
            angle: id as f32,
            orbit_radius,
            angular_speed: 0.002,
            acceleration: 0.0,
        }
    }

    fn small_config() -> SimulationConfig {
        SimulationConfig::default()
            .with_particle_count(500)
            .with_seed(42)
            .with_viewport(Viewport::new(800.0, 600.0, 1.0))
    }

    #[test]
    fn test_initial_population() {
        let sim = Simulation::new(small_config());
        assert_eq!(sim.particle_count(), 500);
        assert_eq!(sim.attractor().radius, 100.0);

        let ids: HashSet<u64> = sim.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), 500);
    }

    #[test]
    fn test_population_conserved() {
        let mut sim = Simulation::new(small_config());
        let mut absorbed = 0;
        for _ in 0..300 {
            absorbed += sim.tick().absorbed;
            assert_eq!(sim.particle_count(), 500);
        }
        // The inner disk falls in quickly
        assert!(absorbed > 0);
        assert_eq!(sim.total_absorbed(), absorbed as u64);
    }

    #[test]
    fn test_mass_and_radius_monotonic() {
        let mut sim = Simulation::new(small_config());
        let mut mass = sim.attractor().added_mass;
        let mut radius = sim.attractor().radius;

        for _ in 0..300 {
            sim.tick();
            assert!(sim.attractor().added_mass >= mass);
            assert!(sim.attractor().radius >= radius);
            mass = sim.attractor().added_mass;
            radius = sim.attractor().radius;
        }
    }

    #[test]
    fn test_radius_freezes_past_cap() {
        // Cap of 14 on a 70x70 surface: any radius is already past it
        let viewport = Viewport::new(70.0, 70.0, 1.0);
        let config = small_config().with_viewport(viewport);
        let mut sim = Simulation::new(config);
        assert!(sim.attractor().is_saturated(viewport.radius_cap()));

        for _ in 0..50 {
            sim.tick();
            assert_eq!(sim.attractor().radius, 100.0);
        }
        assert!(sim.attractor().added_mass > 0.0);
    }

    #[test]
    fn test_absorbed_star_is_gone_by_identity() {
        let particles = vec![star(0, 300.0, 1.0), star(1, 20.0, 1.0), star(2, 400.0, 1.0)];
        let mut sim = Simulation::from_parts(
            particles,
            Attractor::default(),
            Viewport::new(800.0, 600.0, 1.0),
            1,
        );

        let report = sim.tick();
        assert_eq!(report.absorbed, 1);

        let ids: Vec<u64> = sim.particles().iter().map(|p| p.id).collect();
        assert!(!ids.contains(&1));
        assert_eq!(ids, vec![0, 2, 3]);
    }

    #[test]
    fn test_adjacent_absorptions_visit_every_star() {
        // Consecutive absorptions must not skip the star after each removal
        let particles = vec![
            star(0, 10.0, 1.0),
            star(1, 20.0, 1.5),
            star(2, 300.0, 1.0),
            star(3, 30.0, 2.0),
            star(4, 350.0, 1.0),
        ];
        let mut sim = Simulation::from_parts(
            particles,
            Attractor::default(),
            Viewport::new(800.0, 600.0, 1.0),
            9,
        );

        let mut visited = Vec::new();
        let report = sim.step(|p| visited.push(p.id));

        assert_eq!(visited, vec![0, 1, 2, 3, 4]);
        assert_eq!(report.absorbed, 3);
        assert!((report.added_mass - 4.5).abs() < 1e-6);
        assert_eq!(sim.particle_count(), 5);

        let survivors: Vec<&Particle> = sim.particles().iter().filter(|p| p.id < 5).collect();
        assert_eq!(survivors.len(), 2);
        assert!(survivors.iter().all(|p| p.orbit_radius < 350.0));
    }

    #[test]
    fn test_respawns_land_outside_field() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let particles = (0..20).map(|id| star(id, 5.0, 1.0)).collect();
        let mut sim = Simulation::from_parts(particles, Attractor::default(), viewport, 5);

        sim.tick();
        assert_eq!(sim.particle_count(), 20);
        for p in sim.particles() {
            assert!(p.id >= 20);
            assert!(p.orbit_radius >= viewport.origin_distance());
        }
    }

    #[test]
    fn test_one_tick_scenario() {
        let particles = vec![
            star(0, 50.0, 1.75),
            star(1, 300.0, 1.0),
            star(2, 300.0, 2.0),
            star(3, 300.0, 0.5),
        ];
        let mut sim = Simulation::from_parts(
            particles,
            Attractor::new(100.0),
            Viewport::new(800.0, 600.0, 1.0),
            3,
        );

        let report = sim.tick();

        assert_eq!(report.absorbed, 1);
        assert_eq!(sim.attractor().added_mass, 1.75);
        assert_eq!(sim.particle_count(), 4);
        assert!(sim.particles().iter().all(|p| p.id != 0));

        for id in 1..=3 {
            let p = sim
                .particles()
                .iter()
                .find(|p| p.id == id)
                .expect("outside star survives");
            assert!(p.orbit_radius < 300.0);
        }
    }

    #[test]
    fn test_resize_keeps_orbits() {
        let mut sim = Simulation::new(small_config());
        let before: Vec<f32> = sim.particles().iter().map(|p| p.orbit_radius).collect();

        sim.resize(Viewport::new(200.0, 100.0, 2.0));
        assert_eq!(sim.viewport().width, 200.0);

        let after: Vec<f32> = sim.particles().iter().map(|p| p.orbit_radius).collect();
        assert_eq!(before, after);

        // Stars now far off-surface keep simulating
        for _ in 0..10 {
            sim.tick();
            assert_eq!(sim.particle_count(), 500);
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let mut a = Simulation::new(small_config());
        let mut b = Simulation::new(small_config());
        for _ in 0..20 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.attractor(), b.attractor());
    }
}
