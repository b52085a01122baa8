//! Frame loop: clear, draw-and-step every star, draw and grow the attractor

use particle_renderer::{Canvas, SceneRenderer};
use particle_simulation::{Simulation, StepReport};
use std::time::{Duration, Instant};

/// Frame interval used when the display refresh cannot be synced to (~60 Hz)
pub const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Something that can run the next frame before the next repaint
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// How frames are paced
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FramePacing {
    /// Presenting blocks until the display refresh; request the next frame
    /// right away.
    Vsync,
    /// Wait a fixed interval between frames.
    Interval(Duration),
}

impl FramePacing {
    pub fn fallback() -> Self {
        FramePacing::Interval(FALLBACK_FRAME_INTERVAL)
    }

    /// When the frame after one finished at `finished` should start.
    /// `None` means immediately.
    pub fn next_deadline(&self, finished: Instant) -> Option<Instant> {
        match self {
            FramePacing::Vsync => None,
            FramePacing::Interval(interval) => Some(finished + *interval),
        }
    }

    /// Schedule the frame after one finished at `finished`.
    ///
    /// Under vsync the next frame is requested from `scheduler` right away and
    /// `None` is returned. Otherwise nothing is requested yet and the caller
    /// gets the deadline to wait for.
    pub fn schedule<S: FrameScheduler + ?Sized>(
        &self,
        scheduler: &S,
        finished: Instant,
    ) -> Option<Instant> {
        let deadline = self.next_deadline(finished);
        if deadline.is_none() {
            scheduler.request_frame();
        }
        deadline
    }
}

/// Summary of one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// 1-based frame number
    pub frame: u64,
    /// Stars that passed the visibility test and were drawn
    pub drawn: usize,
    pub step: StepReport,
    pub attractor_radius: f32,
    pub added_mass: f64,
}

pub struct FrameDriver {
    scene: SceneRenderer,
    frames: u64,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(SceneRenderer::default())
    }
}

impl FrameDriver {
    pub fn new(scene: SceneRenderer) -> Self {
        Self { scene, frames: 0 }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame onto `canvas`.
    ///
    /// Each star is drawn (if visible) from its state at the start of the
    /// frame, then advanced. The attractor is drawn at its current radius
    /// and grows afterwards, so growth shows up on the next frame.
    pub fn frame<C: Canvas + ?Sized>(
        &mut self,
        simulation: &mut Simulation,
        canvas: &mut C,
    ) -> FrameReport {
        let viewport = *simulation.viewport();
        let scene = self.scene;

        scene.clear(canvas, &viewport);

        let mut drawn = 0;
        let step = simulation.step(|particle| {
            if scene.draw_particle(canvas, &viewport, particle) {
                drawn += 1;
            }
        });

        scene.draw_attractor(canvas, &viewport, simulation.attractor());
        let attractor_radius = simulation.grow_attractor();

        self.frames += 1;

        FrameReport {
            frame: self.frames,
            drawn,
            step,
            attractor_radius,
            added_mass: simulation.attractor().added_mass,
        }
    }

    /// Run frames back to back until `stop` returns true for a frame's
    /// report. Returns the number of frames run by this call.
    pub fn run_until<C, F>(
        &mut self,
        simulation: &mut Simulation,
        canvas: &mut C,
        mut stop: F,
    ) -> u64
    where
        C: Canvas + ?Sized,
        F: FnMut(&FrameReport) -> bool,
    {
        let start = self.frames;
        loop {
            let report = self.frame(simulation, canvas);
            if stop(&report) {
                return self.frames - start;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use particle_physics::{Attractor, Color, Particle, Viewport};
    use particle_renderer::Shadow;
    use particle_simulation::SimulationConfig;
    use std::cell::Cell;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Op {
        Scale,
        Fill,
        Rect,
        Circle(f32),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Canvas for Recorder {
        fn set_scale(&mut self, _pixel_ratio: f32) {
            self.ops.push(Op::Scale);
        }

        fn fill(&mut self, _color: Color) {
            self.ops.push(Op::Fill);
        }

        fn fill_rect(&mut self, _origin: Vec2, _size: Vec2, _color: Color) {
            self.ops.push(Op::Rect);
        }

        fn fill_circle(&mut self, _center: Vec2, radius: f32, _color: Color, _shadow: Option<Shadow>) {
            self.ops.push(Op::Circle(radius));
        }
    }

    #[derive(Default)]
    struct CountingScheduler {
        requests: Cell<u32>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    fn star(id: u64, position: Vec2, orbit_radius: f32) -> Particle {
        Particle {
            id,
            position,
            radius: 1.0,
            color: Color::WHITE,
            angle: 0.0,
            orbit_radius,
            angular_speed: 0.0,
            acceleration: 0.0,
        }
    }

    #[test]
    fn test_frame_order() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let particles = vec![
            star(0, Vec2::new(10.0, 10.0), 300.0),
            star(1, Vec2::new(-500.0, 10.0), 300.0),
            star(2, Vec2::new(20.0, 20.0), 300.0),
        ];
        let mut sim = Simulation::from_parts(particles, Attractor::default(), viewport, 0);
        let mut canvas = Recorder::default();

        let report = FrameDriver::default().frame(&mut sim, &mut canvas);

        // Star 1 starts off-surface and is culled on this frame
        assert_eq!(
            canvas.ops,
            vec![Op::Scale, Op::Fill, Op::Rect, Op::Rect, Op::Circle(100.0)]
        );
        assert_eq!(report.frame, 1);
        assert_eq!(report.drawn, 2);
        assert_eq!(report.step.absorbed, 0);
    }

    #[test]
    fn test_attractor_drawn_before_growth() {
        let viewport = Viewport::new(800.0, 600.0, 1.0);
        let mut attractor = Attractor::default();
        // Enough mass for the growth rule to land well above 100
        attractor.absorb(10_000.0);
        let mut sim = Simulation::from_parts(vec![star(0, Vec2::ZERO, 300.0)], attractor, viewport, 0);
        let mut canvas = Recorder::default();

        let report = FrameDriver::default().frame(&mut sim, &mut canvas);

        assert_eq!(canvas.ops.last(), Some(&Op::Circle(100.0)));
        assert!(report.attractor_radius > 100.0);
        assert_eq!(sim.attractor().radius, report.attractor_radius);
    }

    #[test]
    fn test_run_until_stops() {
        let config = SimulationConfig::default()
            .with_particle_count(200)
            .with_seed(1)
            .with_viewport(Viewport::new(640.0, 480.0, 1.0));
        let mut sim = Simulation::new(config);
        let mut canvas = Recorder::default();
        let mut driver = FrameDriver::default();

        let mut last_mass = 0.0;
        let frames = driver.run_until(&mut sim, &mut canvas, |report| {
            assert!(report.added_mass >= last_mass);
            last_mass = report.added_mass;
            report.frame == 25
        });

        assert_eq!(frames, 25);
        assert_eq!(driver.frames(), 25);
        assert_eq!(sim.particle_count(), 200);

        // Canvas keeps every frame's calls; each frame ends on the attractor
        let circles = canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Circle(_)))
            .count();
        assert_eq!(circles, 25);
    }

    #[test]
    fn test_vsync_requests_next_frame() {
        let scheduler = CountingScheduler::default();
        let now = Instant::now();

        assert_eq!(FramePacing::Vsync.schedule(&scheduler, now), None);
        assert_eq!(FramePacing::Vsync.schedule(&scheduler, now), None);
        assert_eq!(scheduler.requests.get(), 2);
    }

    #[test]
    fn test_interval_defers_request() {
        let scheduler = CountingScheduler::default();
        let now = Instant::now();

        let deadline = FramePacing::fallback().schedule(&scheduler, now);

        assert_eq!(deadline, Some(now + FALLBACK_FRAME_INTERVAL));
        assert_eq!(scheduler.requests.get(), 0);
    }

    #[test]
    fn test_pacing_deadlines() {
        let now = Instant::now();
        assert_eq!(FramePacing::Vsync.next_deadline(now), None);
        assert_eq!(
            FramePacing::fallback().next_deadline(now),
            Some(now + FALLBACK_FRAME_INTERVAL)
        );
    }
}
