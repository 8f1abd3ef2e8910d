use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{Key, KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};
use voxedit_author::{EditOutcome, Editor};
use voxedit_common::{Color, EditorConfig, Mode};
use voxedit_input::{Action, ColorControl, PointerButton, PointerEvent, PointerPhase, ToolButton};
use voxedit_render_wgpu::{OrbitCamera, WgpuRenderer};
use voxedit_scene::Scene;
use voxedit_tools::SceneInspector;

#[derive(Parser)]
#[command(name = "voxedit-desktop", about = "Voxel editor desktop application")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the initial grid size
    #[arg(long)]
    grid_size: Option<u32>,

    /// Seed for random colours
    #[arg(long)]
    seed: Option<u64>,
}

/// Pointer drag driving the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

/// Application state.
struct AppState {
    config: EditorConfig,
    scene: Scene,
    editor: Editor,
    camera: OrbitCamera,
    show_panels: bool,
    // Input state
    cursor: Vec2,
    viewport: Vec2,
    drag: Option<Drag>,
}

impl AppState {
    fn new(config: EditorConfig) -> Self {
        let mut scene = Scene::new();
        let mut editor = Editor::new(&config);
        editor.generate_grid(&mut scene, config.grid_size);
        scene.drain_events();

        Self {
            camera: OrbitCamera::from_config(&config.camera),
            config,
            scene,
            editor,
            show_panels: true,
            cursor: Vec2::ZERO,
            viewport: Vec2::ONE,
            drag: None,
        }
    }

    fn apply(&mut self, action: Action) {
        let outcome = self.editor.apply(&mut self.scene, action);
        if !matches!(outcome, EditOutcome::Ignored) {
            tracing::debug!(?outcome, "edit");
        }
        for event in self.scene.drain_events() {
            tracing::trace!(?event, "scene");
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Vec2::new(width.max(1) as f32, height.max(1) as f32);
        self.camera.set_aspect(width, height);
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.physical_key == PhysicalKey::Code(KeyCode::F1) {
            self.show_panels = !self.show_panels;
            return;
        }
        if let Key::Character(text) = &event.logical_key {
            if let Some(ch) = text.chars().next() {
                self.apply(voxedit_input::shortcut(ch));
            }
        }
    }

    fn handle_button(&mut self, button: MouseButton, pressed: bool) {
        match (button, pressed) {
            (MouseButton::Right, true) => self.drag = Some(Drag::Rotate),
            (MouseButton::Middle, true) => self.drag = Some(Drag::Pan),
            (MouseButton::Right | MouseButton::Middle, false) => self.drag = None,
            _ => {}
        }

        let event = PointerEvent {
            phase: if pressed {
                PointerPhase::Down
            } else {
                PointerPhase::Up
            },
            button: pointer_button(button),
            position: self.cursor,
        };
        let (camera, viewport) = (&self.camera, self.viewport);
        let action = event.into_action(|p| camera.screen_ray(p, viewport));
        if !matches!(action, Action::Noop) {
            self.apply(action);
        }
    }

    fn handle_cursor(&mut self, position: Vec2) {
        let delta = position - self.cursor;
        self.cursor = position;
        match self.drag {
            Some(Drag::Rotate) => self.camera.rotate(delta.x, delta.y),
            Some(Drag::Pan) => self.camera.pan(delta.x, delta.y),
            None => {}
        }
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let lines = match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(p) => p.y as f32 / 40.0,
        };
        self.camera.zoom(lines);
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panels {
            return;
        }

        let mode = self.editor.mode();
        let color = self.editor.color();
        let summary = SceneInspector::summary(&self.scene, &self.editor);

        egui::SidePanel::left("tools")
            .default_width(180.0)
            .show(ctx, |ui| {
                ui.heading("Tools");
                ui.separator();
                for button in ToolButton::ALL {
                    let label = match button {
                        ToolButton::Mode(m) => format!("{} ({})", button.label(), mode_key(m)),
                        ToolButton::Clear => format!("{} (C)", button.label()),
                    };
                    if ui.selectable_label(button.is_active(mode), label).clicked() {
                        self.apply(button.action());
                    }
                }

                ui.separator();
                ui.label(format!("Cubes: {}", summary.tracked));
                ui.label(format!("Meshes: {}", summary.meshes));
                ui.label(format!("Layers: {}", summary.layers));
                if summary.untracked > 0 {
                    ui.label(format!("Untracked: {}", summary.untracked));
                }
                let eye = self.camera.position();
                ui.label(format!("Camera: ({:.1}, {:.1}, {:.1})", eye.x, eye.y, eye.z));

                ui.separator();
                ui.small("F1: Toggle panels | LMB: Edit | RMB: Orbit | MMB: Pan | Wheel: Zoom");
            });

        egui::SidePanel::right("colours")
            .default_width(120.0)
            .show(ctx, |ui| {
                ui.heading("Colour");
                ui.separator();
                let mut chosen = None;
                let random = ColorControl::Random;
                if ui.selectable_label(random.is_active(color), "Random (R)").clicked() {
                    chosen = Some(random);
                }
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    for control in ColorControl::all(self.editor.palette().colors()) {
                        if let ColorControl::Swatch(c) = control {
                            if ui.add(swatch(c, control.is_active(color))).clicked() {
                                chosen = Some(control);
                            }
                        }
                    }
                });
                if let Some(control) = chosen {
                    self.apply(control.action());
                }
            });
    }
}

fn mode_key(mode: Mode) -> char {
    match mode {
        Mode::Create => '1',
        Mode::Delete => '2',
        Mode::Paint => '3',
    }
}

fn swatch(color: Color, active: bool) -> egui::Button<'static> {
    let stroke = if active {
        egui::Stroke::new(3.0, egui::Color32::WHITE)
    } else {
        egui::Stroke::new(1.0, egui::Color32::DARK_GRAY)
    };
    egui::Button::new("")
        .fill(egui::Color32::from_rgb(color.r, color.g, color.b))
        .stroke(stroke)
        .min_size(egui::vec2(40.0, 28.0))
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        MouseButton::Back => PointerButton::Other(3),
        MouseButton::Forward => PointerButton::Other(4),
        MouseButton::Other(n) => PointerButton::Other(n),
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(config: EditorConfig) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn redraw(&mut self) {
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

        if let Some(renderer) = &self.renderer {
            renderer.render(device, queue, &view, &self.state.camera, &self.state.scene);
        }

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
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
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
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Voxel Editor")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("voxedit_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.resize(config.width, config.height);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &self.state.config.lighting,
            self.state.config.background,
        );

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
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Events over the panels belong to egui.
        let consumed = match (&mut self.egui_winit, &self.window) {
            (Some(egui_winit), Some(window)) => egui_winit.on_window_event(window, &event).consumed,
            _ => false,
        };

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.resize(config.width, config.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            // Releases always end a drag, even over a panel.
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } => self.state.handle_button(button, false),
            _ if consumed => {}
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    self.state.handle_key(&event);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .handle_cursor(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => self.state.handle_button(button, true),
            WindowEvent::MouseWheel { delta, .. } => self.state.handle_wheel(delta),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
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

    let mut config = EditorConfig::load_or_default(cli.config.as_deref())?;
    if let Some(size) = cli.grid_size {
        config.grid_size = size;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    tracing::info!("voxedit-desktop starting ({0}x{0} grid)", config.grid_size);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
