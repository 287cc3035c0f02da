//! Ragingsea - a raging sea with a ship riding the swell
//!
//! Big sine swells plus layered Perlin chop, shaded from a deep trough
//! color to a bright crest color, under a scattering daylight sky.
//!
//! Controls: drag to orbit, wheel to zoom, Tab/arrows to tweak the
//! debug panel (Shift for x10), Backspace/R to reset, P to print it.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalPosition,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

use ragingsea::camera::OrbitCamera;
use ragingsea::cli::Args;
use ragingsea::debug_panel::DebugPanel;
use ragingsea::ocean::OceanSystem;
use ragingsea::params::*;
use ragingsea::rendering::{RenderSystem, WaterUniforms};
use ragingsea::ship::{ShipSystem, ShipUniforms};
use ragingsea::sky::SkyScattering;

/// Pixels of trackpad scroll treated as one wheel notch
const PIXELS_PER_NOTCH: f32 = 50.0;

struct FpsTracker {
    frame_times: VecDeque<Duration>,
    last_frame: Instant,
    last_report: Instant,
}

impl FpsTracker {
    fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_times: VecDeque::new(),
            last_frame: now,
            last_report: now,
        }
    }

    fn record_frame(&mut self) {
        let now = Instant::now();
        self.frame_times.push_back(now - self.last_frame);
        self.last_frame = now;
        if self.frame_times.len() > 60 {
            self.frame_times.pop_front();
        }

        if now - self.last_report > Duration::from_secs(1) {
            let total: Duration = self.frame_times.iter().sum();
            let avg = total.as_secs_f32() / self.frame_times.len() as f32;
            if avg > 0.0 {
                log::debug!("FPS: {:.1}", 1.0 / avg);
            }
            self.last_report = now;
        }
    }
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Simulation systems
    ocean: OceanSystem,
    ship: ShipSystem,
    camera: OrbitCamera,
    panel: DebugPanel,

    // Configuration
    params: SceneParams,
    sky: SkyParams,
    lights: LightParams,
    render_config: RenderConfig,

    // Input state
    modifiers: ModifiersState,
    dragging: bool,
    last_cursor: Option<PhysicalPosition<f64>>,

    // Time tracking
    start_time: Instant,
    fps: FpsTracker,
}

impl App {
    fn new(args: &Args) -> Self {
        let mut params = SceneParams::default();
        args.apply(&mut params);
        let render_config = args.render_config();
        let mesh_config = args.mesh_config();

        let ocean = OceanSystem::new(&mesh_config, params.waves.noise_seed);
        log::info!(
            "Water grid: {} segments, {} vertices",
            ocean.grid.segments(),
            ocean.grid.vertices.len()
        );

        Self {
            window: None,
            render_system: None,
            ocean,
            ship: ShipSystem::new(&params.ship),
            camera: OrbitCamera::new(OrbitCameraParams::default()),
            panel: DebugPanel::new(&params),
            params,
            sky: SkyParams::default(),
            lights: LightParams::default(),
            render_config,
            modifiers: ModifiersState::empty(),
            dragging: false,
            last_cursor: None,
            start_time: Instant::now(),
            fps: FpsTracker::new(),
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Ragingsea")
            .with_inner_size(winit::dpi::PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.ocean.grid,
            &self.ship.mesh,
        ))?;

        let (width, height) = render_system.size();
        self.render_config.window_width = width;
        self.render_config.window_height = height;

        self.window = Some(window);
        self.render_system = Some(render_system);
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        let steps = if self.modifiers.shift_key() { 10 } else { 1 };
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Tab | KeyCode::ArrowDown => self.panel.select_next(),
            KeyCode::ArrowUp => self.panel.select_previous(),
            KeyCode::ArrowRight => {
                self.panel.nudge(&mut self.params, steps);
            }
            KeyCode::ArrowLeft => {
                self.panel.nudge(&mut self.params, -steps);
            }
            KeyCode::Backspace => self.panel.reset_selected(&mut self.params),
            KeyCode::KeyR => self.panel.reset_all(&mut self.params),
            KeyCode::KeyP => log::info!("Debug panel:\n{}", self.panel.summary(&self.params)),
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_graphics(event_loop) {
            log::error!("Graphics initialization failed: {:#}", e);
            event_loop.exit();
            return;
        }

        log::info!("Ragingsea is running. Drag to orbit, scroll to zoom, ESC to quit");
        log::info!("Debug panel:\n{}", self.panel.summary(&self.params));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
                if size.width > 0 && size.height > 0 {
                    self.render_config.window_width = size.width;
                    self.render_config.window_height = size.height;
                }
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = modifiers.state();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        ..
                    },
                ..
            } => self.handle_key(event_loop, key),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let (true, Some(last)) = (self.dragging, self.last_cursor) {
                    self.camera.drag(
                        (position.x - last.x) as f32,
                        (position.y - last.y) as f32,
                        self.render_config.window_height as f32,
                    );
                }
                self.last_cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_NOTCH,
                };
                self.camera.zoom(notches);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame();
            }
            _ => {}
        }
    }
}

impl App {
    /// Render a single frame
    fn render_frame(&mut self) {
        let Some(render_system) = &mut self.render_system else {
            return;
        };

        let time_s = self.start_time.elapsed().as_secs_f32();

        // Update camera
        self.camera.update();
        let (view_proj, camera_pos) = self.camera.create_view_proj_matrix(&self.render_config);

        // Displace the water; the ramp colors are shaded per fragment
        self.ocean.update(time_s, &self.params.waves);
        render_system.update_water_vertices(&self.ocean.grid.vertices);
        render_system.update_water_uniforms(&WaterUniforms::new(view_proj, &self.params.colors));

        // Sky
        let scattering = SkyScattering::new(&self.sky);
        render_system.update_sky_uniforms(&scattering.uniforms(view_proj, camera_pos, &self.sky));

        // Ship rides the swell
        let ship = &self.params.ship;
        let pose = ShipSystem::pose(time_s, self.params.waves.big_elevation, ship);
        let model = ShipSystem::model_matrix(&pose, ship);
        render_system.update_ship_uniforms(&ShipUniforms::new(
            view_proj,
            model,
            &self.lights,
            ship.hull_color,
        ));

        match render_system.render() {
            Ok(()) => self.fps.record_frame(),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (width, height) = render_system.size();
                render_system.resize(width, height);
            }
            Err(e) => log::error!("Render error: {:?}", e),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    log::info!("Ragingsea - initializing systems");

    let mut app = App::new(&args);
    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
