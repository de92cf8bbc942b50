mod gamepad;
mod sink;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec3;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};
use viewport_common::{Color, SurfaceSize, ViewportConfig, to_radians};
use viewport_input::{InputEvent, Key};
use viewport_kernel::{PartOverrides, SceneDescription};
use viewport_render::FrameDriver;
use viewport_tools::SceneInspector;

use crate::gamepad::GamepadPoller;
use crate::sink::EguiSink;

#[derive(Parser)]
#[command(name = "viewport-desktop", about = "3D viewport desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene description (JSON); the demo scene if omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,
}

/// The drawing surface could not be created. Fatal to startup.
#[derive(Debug, thiserror::Error)]
enum SurfaceError {
    #[error("drawing surface unavailable: {0}")]
    MissingSurface(String),
}

const PALETTE: [&str; 5] = ["#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6"];

/// Application state.
struct AppState {
    driver: FrameDriver,
    sink: EguiSink,
    gamepad: GamepadPoller,
    show_inspector: bool,
    cursor: (f32, f32),
    spawned: usize,
    last_frame: Instant,
    // Fixed timestep
    tick_accumulator: f64,
    tick_rate: f64,
}

impl AppState {
    fn new(driver: FrameDriver) -> Self {
        Self {
            driver,
            sink: EguiSink::new(egui::Color32::from_rgb(16, 18, 22)),
            gamepad: GamepadPoller::new(),
            show_inspector: true,
            cursor: (0.0, 0.0),
            spawned: 0,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
            tick_rate: 1.0 / 60.0,
        }
    }

    /// Step the camera at a fixed rate, independent of the refresh rate.
    fn update(&mut self, dt: f64) {
        let pad = self.gamepad.poll();
        self.tick_accumulator += dt;
        let mut steps = 0;
        while self.tick_accumulator >= self.tick_rate && steps < 5 {
            self.tick_accumulator -= self.tick_rate;
            self.driver.advance(pad.as_ref());
            steps += 1;
        }
        if steps == 5 {
            self.tick_accumulator = 0.0;
        }
    }

    fn handle_key(&mut self, code: KeyCode, pressed: bool) {
        let key = match code {
            KeyCode::KeyW => Some(Key::W),
            KeyCode::KeyA => Some(Key::A),
            KeyCode::KeyS => Some(Key::S),
            KeyCode::KeyD => Some(Key::D),
            KeyCode::Space => Some(Key::Space),
            _ => None,
        };
        if let Some(key) = key {
            let event = if pressed {
                InputEvent::KeyDown(key)
            } else {
                InputEvent::KeyUp(key)
            };
            self.driver.push_input(event);
            return;
        }

        if !pressed {
            return;
        }
        match code {
            KeyCode::Escape => {
                tracing::info!("stop requested");
                self.driver.stop_handle().stop();
            }
            KeyCode::F1 => {
                self.show_inspector = !self.show_inspector;
            }
            KeyCode::KeyN => self.spawn_part(),
            _ => {}
        }
    }

    /// Drop a part a few units ahead of the camera.
    fn spawn_part(&mut self) {
        let cam = *self.driver.camera();
        let (sin_yaw, cos_yaw) = to_radians(cam.yaw).sin_cos();
        let forward = Vec3::new(-sin_yaw, 0.0, -cos_yaw);
        let color = PALETTE[self.spawned % PALETTE.len()];
        let scene = self.driver.scene_mut();
        let ws = scene.workspace();
        let result = scene.create_instance(
            "Part",
            PartOverrides {
                color: Some(Color::new(color)),
                size: Some(Vec3::splat(2.0)),
                position: Some(cam.position + forward * 8.0),
                ..Default::default()
            },
            Some(ws),
        );
        match result {
            Ok(id) => {
                self.spawned += 1;
                tracing::info!(%id, "spawned part");
            }
            Err(e) => tracing::error!("failed to spawn part: {e}"),
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if self.show_inspector {
            let summary = SceneInspector::summary(self.driver.scene());
            let cam = *self.driver.camera();
            let mut spawn = false;

            egui::SidePanel::left("inspector")
                .default_width(260.0)
                .show(ctx, |ui| {
                    ui.heading("Viewport");
                    ui.separator();
                    ui.label(format!("Objects: {}", summary.objects));
                    ui.label(format!("Rendered parts: {}", summary.rendered_parts));
                    ui.label(format!(
                        "Camera: ({:.1}, {:.1}, {:.1})",
                        cam.position.x, cam.position.y, cam.position.z
                    ));
                    ui.label(format!("Pitch {:.1}  Yaw {:.1}", cam.pitch, cam.yaw));
                    ui.separator();
                    if ui.button("Spawn Part (N)").clicked() {
                        spawn = true;
                    }
                    ui.separator();
                    ui.heading("Scene");
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.monospace(SceneInspector::tree(self.driver.scene()));
                    });
                    ui.separator();
                    ui.small("F1: Toggle Inspector | LMB drag: Look | WASD: Move | Space: Jump");
                });

            if spawn {
                self.spawn_part();
            }
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let rect = response.rect;
                let size = SurfaceSize::new(rect.width(), rect.height(), ctx.pixels_per_point());
                if size != self.driver.surface() {
                    self.driver.resize(size);
                }
                self.sink.set_origin(rect.min);
                if let Some(stats) = self.driver.draw(&mut self.sink) {
                    tracing::trace!(
                        frame = stats.frame,
                        faces = stats.faces_drawn,
                        culled = stats.faces_culled,
                        "frame"
                    );
                }
                painter.extend(self.sink.take_shapes());
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    fatal: Option<SurfaceError>,
}

impl GpuApp {
    fn new(driver: FrameDriver) -> Self {
        Self {
            state: AppState::new(driver),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            fatal: None,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SurfaceError> {
        let missing = |e: &dyn std::fmt::Display| SurfaceError::MissingSurface(e.to_string());

        let attrs = Window::default_attributes()
            .with_title("Viewport")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).map_err(|e| missing(&e))?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| missing(&e))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| SurfaceError::MissingSurface("no compatible GPU adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("viewport_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| missing(&e))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| SurfaceError::MissingSurface("surface has no formats".into()))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "surface initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f64().min(0.1);
        self.state.last_frame = now;
        self.state.update(dt);

        let (
            Some(window),
            Some(surface),
            Some(device),
            Some(queue),
            Some(config),
            Some(egui_winit),
            Some(egui_renderer),
        ) = (
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.config,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        )
        else {
            return;
        };

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
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

        let raw_input = egui_winit.take_egui_input(window);
        let state = &mut self.state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("viewport_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("viewport_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_gpu(event_loop) {
            tracing::error!("{e}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                self.state.driver.stop_handle().stop();
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f32>(scale);
                self.state.cursor = (logical.x, logical.y);
                self.state.driver.push_input(InputEvent::PointerMove {
                    x: logical.x,
                    y: logical.y,
                });
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let (x, y) = self.state.cursor;
                let event = if btn_state == ElementState::Pressed {
                    InputEvent::PointerDown { x, y }
                } else {
                    InputEvent::PointerUp
                };
                self.state.driver.push_input(event);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
                if !self.state.driver.is_running() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.state.driver.is_running() {
            event_loop.exit();
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => ViewportConfig::load(path)?,
        None => ViewportConfig::default(),
    };
    let description = match &cli.scene {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::demo(),
    };
    let scene = description.build()?;

    tracing::info!("viewport-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let driver = FrameDriver::new(scene, &config, SurfaceSize::default());
    let mut app = GpuApp::new(driver);
    event_loop.run_app(&mut app)?;

    if let Some(e) = app.fatal.take() {
        return Err(e.into());
    }
    Ok(())
}
