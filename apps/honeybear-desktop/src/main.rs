mod config;
mod state;

use anyhow::{Context, Result};
use clap::Parser;
use config::AppConfig;
use egui::Context as EguiContext;
use glam::Vec2;
use honeybear_assets::{
    AssetError, AssetPaths, CubeMapImages, ImageData, load_cube_map, load_image, load_typeface,
    spawn_load,
};
use honeybear_geometry::Typeface;
use honeybear_input::{PointerButton, action_for_key};
use honeybear_render::Viewport;
use honeybear_render_wgpu::WgpuRenderer;
use state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy};
use winit::keyboard::Key;
use winit::window::{Fullscreen, Window, WindowId};

#[derive(Parser)]
#[command(name = "honeybear-desktop", about = "HoneyBear 3D text and primitives demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding fonts/ and textures/
    #[arg(long)]
    asset_root: Option<PathBuf>,

    /// Seed for scattering nodes
    #[arg(long)]
    seed: Option<u64>,
}

/// Loader completions forwarded to the event loop thread.
enum AppEvent {
    FontLoaded(Result<Typeface, AssetError>),
    EnvironmentLoaded(Result<CubeMapImages, AssetError>),
    MatcapLoaded(Result<ImageData, AssetError>),
}

/// Window and GPU resources, created on first resume.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext) -> Result<(Self, Viewport)> {
        let attrs = Window::default_attributes()
            .with_title("HoneyBear")
            .with_inner_size(LogicalSize::new(1280.0, 720.0));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no GPU adapter compatible with the window surface")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("honeybear_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let viewport = Viewport::from_physical(size.width, size.height, window.scale_factor());
        let (width, height) = viewport.surface_size();

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("surface reports no texture formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, surface_format, width, height);
        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            width,
            height,
            pixel_ratio = viewport.pixel_ratio(),
            "GPU initialized"
        );

        Ok((
            Self {
                window,
                surface,
                device,
                queue,
                config,
                renderer,
                egui_winit,
                egui_renderer,
            },
            viewport,
        ))
    }

    fn reconfigure(&mut self, viewport: &Viewport) {
        let (width, height) = viewport.surface_size();
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
    }

    fn toggle_fullscreen(&self) {
        let next = match self.window.fullscreen() {
            Some(_) => None,
            None => Some(Fullscreen::Borderless(None)),
        };
        tracing::debug!(fullscreen = next.is_some(), "toggling fullscreen");
        self.window.set_fullscreen(next);
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &AppConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    /// Push textures that finished loading to the GPU.
    fn install_textures(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if let Some(images) = self.state.take_environment() {
            gpu.renderer.set_environment(&gpu.device, &gpu.queue, &images);
        }
        if let Some(image) = self.state.take_matcap() {
            gpu.renderer.set_matcap(&gpu.device, &gpu.queue, &image);
        }
    }

    fn resize(&mut self, size: PhysicalSize<u32>, scale_factor: f64) {
        self.state.viewport = Viewport::from_physical(size.width, size.height, scale_factor);
        if self.state.viewport.is_minimized() {
            return;
        }
        if let Some(gpu) = &mut self.gpu {
            gpu.reconfigure(&self.state.viewport);
        }
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        if self.state.viewport.is_minimized() {
            return;
        }
        gpu.renderer.sync_meshes(&gpu.device, &self.state.library);

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let aspect = self.state.viewport.aspect();
        {
            let mut frame = gpu.renderer.frame(&gpu.device, &gpu.queue, &view);
            let state = &mut self.state;
            state.driver.frame(
                &mut state.scene,
                &state.config,
                &mut state.controls,
                &mut frame,
                aspect,
            );
        }

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let state = &mut self.state;
        let mut commands = Vec::new();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            commands = state.panel.show(ctx, &mut state.config, &state.scene);
        });
        state.apply_commands(commands);

        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let pixels_per_point = state.viewport.pixel_ratio() as f32;
        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler<AppEvent> for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match Gpu::new(event_loop, &self.egui_ctx) {
            Ok((gpu, viewport)) => {
                self.state.viewport = viewport;
                self.gpu = Some(gpu);
                self.install_textures();
            }
            Err(e) => {
                tracing::error!("failed to initialize window and GPU: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::FontLoaded(result) => {
                self.state.on_font_loaded(result);
            }
            AppEvent::EnvironmentLoaded(result) => self.state.on_environment_loaded(result),
            AppEvent::MatcapLoaded(result) => self.state.on_matcap_loaded(result),
        }
        self.install_textures();
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(gpu) = &mut self.gpu {
            let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
            // Releases always reach the drag tracker so a drag never sticks.
            let release = matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            );
            if response.consumed && !release {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let scale = self.state.viewport.scale_factor;
                self.resize(size, scale);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.gpu.as_ref().map(|g| g.window.inner_size()) {
                    self.resize(size, scale_factor);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Character(text),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for_key(text.as_str()) {
                    if self.state.handle_action(action) {
                        if let Some(gpu) = &self.gpu {
                            gpu.toggle_fullscreen();
                        }
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(self.state.viewport.scale_factor);
                self.state.pointer_moved(Vec2::new(logical.x, logical.y));
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.drag.left();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                    _ => return,
                };
                self.state
                    .pointer_button(button, state == ElementState::Pressed);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                self.state.wheel(lines);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn forward(proxy: &EventLoopProxy<AppEvent>, event: AppEvent) {
    if proxy.send_event(event).is_err() {
        tracing::warn!("event loop closed before asset load finished");
    }
}

/// Kick off the font, environment and matcap loads. Each reports back as an
/// [`AppEvent`].
fn start_loads(paths: &AssetPaths, proxy: EventLoopProxy<AppEvent>) -> Result<()> {
    let font = paths.font_path();
    let tx = proxy.clone();
    spawn_load(
        "font",
        move || load_typeface(font),
        move |result| forward(&tx, AppEvent::FontLoaded(result)),
    )?;

    let faces = paths.cube_face_paths();
    let tx = proxy.clone();
    spawn_load(
        "environment",
        move || load_cube_map(&faces),
        move |result| forward(&tx, AppEvent::EnvironmentLoaded(result)),
    )?;

    let matcap = paths.matcap_path();
    spawn_load(
        "matcap",
        move || load_image(matcap),
        move |result| forward(&proxy, AppEvent::MatcapLoaded(result)),
    )?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(root) = cli.asset_root {
        config.assets.root = root;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    tracing::info!(
        assets = %config.assets.root.display(),
        seed = ?config.seed,
        "honeybear-desktop starting"
    );

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    start_loads(&config.assets, event_loop.create_proxy())?;

    let mut app = GpuApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
