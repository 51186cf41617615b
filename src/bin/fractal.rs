//! Dynamic Fractal Geometry
//!
//! A tetrahedron whose faces are subdivided a little deeper every quarter
//! second, drawn as a tumbling, growing purple wireframe.

use std::process::ExitCode;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use toybox::config::{AppConfig, ConfigError};
use toybox::input::{InputAction, InputMapper};
use toybox::systems::{FractalRenderSystem, WindowSystem};
use toybox_fractal::{FractalAnimator, FractalMesh};
use toybox_render::RenderError;

/// Main application state
struct App {
    config: AppConfig,
    mesh: FractalMesh,
    animator: FractalAnimator,
    start: Instant,
    window: Option<WindowSystem>,
    renderer: Option<FractalRenderSystem>,
    /// Set when the app has to stop because of an error
    failure: Option<String>,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let animator = FractalAnimator::new(config.fractal.animator_settings(), 0.0);
        Self {
            config,
            mesh: FractalMesh::tetrahedron(),
            animator,
            start: Instant::now(),
            window: None,
            renderer: None,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("{}", message);
        self.failure = Some(message);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let window = WindowSystem::create(event_loop, &self.config.fractal.window)
            .map_err(|e| e.to_string())?;
        let mut renderer = FractalRenderSystem::new(window.window().clone(), &self.config.fractal)
            .map_err(|e| e.to_string())?;
        renderer.upload_mesh(&self.mesh);

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let t = self.start.elapsed().as_secs_f64();

        let Some(renderer) = &mut self.renderer else {
            return;
        };

        if self.animator.tick(t, &mut self.mesh).is_some() {
            renderer.upload_mesh(&self.mesh);
        }

        let model = self.animator.model_matrix(t as f32);
        match renderer.render_frame(model) {
            Ok(()) => {}
            Err(RenderError::SurfaceLost) => renderer.reconfigure(),
            Err(RenderError::OutOfMemory) => {
                return self.fail(event_loop, RenderError::OutOfMemory.to_string());
            }
            Err(e) => log::warn!("{}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(message) = self.init_graphics(event_loop) {
                self.fail(event_loop, message);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(physical_size.width, physical_size.height);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    match InputMapper::map_keyboard(key, event.state) {
                        Some(InputAction::Exit) => event_loop.exit(),
                        Some(InputAction::ToggleFullscreen) => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        None => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            _ => {}
        }
    }
}

fn load_config() -> (AppConfig, Option<ConfigError>) {
    match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    }
}

fn main() -> ExitCode {
    let (config, config_error) = load_config();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }
    log::info!("Starting {}", config.fractal.window.title);

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return ExitCode::FAILURE;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
        return ExitCode::FAILURE;
    }

    if app.failure.is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
