//! Black Hole Accretion
//!
//! Stars spiral into a central black hole that grows as it absorbs them.

use blackhole::gpu::GpuState;
use blackhole::{AppError, FrameDriver, FrameReport, FrameScheduler};
use particle_physics::Viewport;
use particle_simulation::{Simulation, SimulationConfig};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

const WINDOW_TITLE: &str = "Black Hole";
const WINDOW_WIDTH: f64 = 1280.0;
const WINDOW_HEIGHT: f64 = 720.0;

/// Frames between stats log lines and title refreshes
const STATS_INTERVAL: u64 = 120;

/// Rolling frame-time window for the fps readout
struct FrameStats {
    frame_times: VecDeque<f32>,
    last_frame_time: Instant,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(100),
            last_frame_time: Instant::now(),
        }
    }

    /// Record a finished frame, returns (fps, average frame time in ms)
    fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let frame_time = (now - self.last_frame_time).as_secs_f32() * 1000.0;
        self.last_frame_time = now;

        if self.frame_times.len() == 100 {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(frame_time);

        let avg = self.frame_times.iter().sum::<f32>() / self.frame_times.len() as f32;
        let fps = if avg > 0.0 { 1000.0 / avg } else { 0.0 };
        (fps, avg)
    }
}

struct App {
    config: SimulationConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    simulation: Option<Simulation>,
    driver: FrameDriver,
    stats: FrameStats,
    next_frame: Option<Instant>,
    error: Option<AppError>,
}

impl App {
    fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            simulation: None,
            driver: FrameDriver::default(),
            stats: FrameStats::new(),
            next_frame: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        self.error = Some(error);
        event_loop.exit();
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        let window = Arc::new(event_loop.create_window(window_attributes)?);
        let gpu_state = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.particle_count + 1,
        ))?;

        let size = window.inner_size();
        let viewport =
            Viewport::from_physical(size.width, size.height, window.scale_factor() as f32);
        let simulation = Simulation::new(self.config.with_viewport(viewport));
        log::info!("✓ Simulation initialized");

        window.request_frame();

        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        self.simulation = Some(simulation);
        Ok(())
    }

    fn resize(&mut self, size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) {
        if let Some(gpu_state) = &mut self.gpu_state {
            gpu_state.resize(size);
        }
        if let Some(simulation) = &mut self.simulation {
            simulation.resize(Viewport::from_physical(
                size.width,
                size.height,
                scale_factor as f32,
            ));
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu_state), Some(simulation)) =
            (&self.window, &mut self.gpu_state, &mut self.simulation)
        else {
            return;
        };

        let driver = &mut self.driver;
        let report = match gpu_state.render(|batch| driver.frame(simulation, batch)) {
            Ok(report) => report,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu_state.resize(window.inner_size());
                window.request_frame();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Surface out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(e) => {
                log::warn!("Skipped frame: {:?}", e);
                window.request_frame();
                return;
            }
        };

        let (fps, frame_time) = self.stats.tick();
        if report.frame % STATS_INTERVAL == 1 {
            window.set_title(&format!(
                "{} - {:.0} FPS ({:.2}ms) - {} stars",
                WINDOW_TITLE,
                fps,
                frame_time,
                simulation.particle_count()
            ));
        }
        if report.frame % STATS_INTERVAL == 0 {
            log_stats(&report, fps, simulation.total_absorbed());
        }

        self.next_frame = gpu_state.pacing().schedule(&**window, Instant::now());
    }
}

fn log_stats(report: &FrameReport, fps: f32, total_absorbed: u64) {
    log::debug!(
        "frame {}: {:.0} fps, {} drawn, radius {:.1}, mass {:.1}, {} absorbed",
        report.frame,
        fps,
        report.drawn,
        report.attractor_radius,
        report.added_mass,
        total_absorbed
    );
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),

            WindowEvent::Resized(physical_size) => {
                let scale_factor = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                self.resize(physical_size, scale_factor);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.window.as_ref().map(|w| w.inner_size()) {
                    self.resize(size, scale_factor);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(deadline) = self.next_frame else {
            return;
        };

        if Instant::now() >= deadline {
            self.next_frame = None;
            event_loop.set_control_flow(ControlFlow::Wait);
            if let Some(window) = &self.window {
                window.request_frame();
            }
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}

fn run() -> Result<(), AppError> {
    log::info!("Starting black hole accretion simulation...");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(SimulationConfig::default());
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
