//! Window surface, device and the shape renderer

use crate::driver::FramePacing;
use crate::error::GpuError;
use particle_renderer::{ShapeBatch, ShapeRenderer};
use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: ShapeRenderer,
    batch: ShapeBatch,
    pacing: FramePacing,
}

impl GpuState {
    pub async fn new(window: Arc<Window>, expected_shapes: usize) -> Result<Self, GpuError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("✓ Using GPU: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;

        // FIFO is synced to the display refresh; without it, pace on a timer
        let (present_mode, pacing) = if surface_caps
            .present_modes
            .contains(&wgpu::PresentMode::Fifo)
        {
            (wgpu::PresentMode::AutoVsync, FramePacing::Vsync)
        } else {
            let mode = surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::AutoNoVsync);
            (mode, FramePacing::fallback())
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        log::info!(
            "✓ Surface {}x{} {:?} ({:?}, {:?} pacing)",
            config.width,
            config.height,
            config.format,
            present_mode,
            pacing
        );

        let renderer = ShapeRenderer::new(&device, config.format);
        log::info!("✓ Renderer initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            renderer,
            batch: ShapeBatch::with_capacity(expected_shapes),
            pacing,
        })
    }

    pub fn pacing(&self) -> FramePacing {
        self.pacing
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Acquire the next surface texture, let `record` fill the shape batch,
    /// then draw and present it. Nothing is recorded if acquisition fails.
    pub fn render<T, F>(&mut self, record: F) -> Result<T, wgpu::SurfaceError>
    where
        F: FnOnce(&mut ShapeBatch) -> T,
    {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let result = record(&mut self.batch);

        self.renderer.render(
            &self.device,
            &self.queue,
            &view,
            (self.config.width, self.config.height),
            &self.batch,
        );

        output.present();
        Ok(result)
    }
}
