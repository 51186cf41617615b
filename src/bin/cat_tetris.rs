//! Cat Tetris
//!
//! Falling-block puzzle where every block is a picture of a cat. Clearing four
//! rows at once lets the player pick the next piece, either in the window or
//! on the console.

use std::error::Error;
use std::io;
use std::process::ExitCode;
use std::time::Instant;

use fontdue::Font;
use image::RgbaImage;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use toybox::config::{AppConfig, ChoiceMode, ConfigError};
use toybox::input::{InputAction, InputMapper};
use toybox::systems::{puzzle_status, LossTimer, PuzzleRenderSystem, WindowSystem};
use toybox_input::PuzzleController;
use toybox_puzzle::{prompt_choice, Game, LockOutcome, Phase};
use toybox_render::{load_block_image, load_font, RenderError};

/// Main application state
struct App {
    config: AppConfig,
    game: Game,
    block_image: RgbaImage,
    font: Font,
    window: Option<WindowSystem>,
    renderer: Option<PuzzleRenderSystem>,
    last_frame: Instant,
    /// Exits the app `lost_delay` seconds after the game is lost
    loss_timer: LossTimer,
    /// Set when the app has to stop because of an error
    failure: Option<String>,
}

impl App {
    fn new(config: AppConfig, game: Game, block_image: RgbaImage, font: Font) -> Self {
        let loss_timer = LossTimer::new(config.puzzle.lost_delay);
        Self {
            config,
            game,
            block_image,
            font,
            window: None,
            renderer: None,
            last_frame: Instant::now(),
            loss_timer,
            failure: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, message: String) {
        log::error!("{}", message);
        self.failure = Some(message);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), String> {
        let mut window = WindowSystem::create(event_loop, &self.config.puzzle.window)
            .map_err(|e| e.to_string())?;
        let renderer = PuzzleRenderSystem::new(
            window.window().clone(),
            &self.config.puzzle,
            &self.block_image,
            &self.font,
        )
        .map_err(|e| e.to_string())?;
        window.update_title(Some(&puzzle_status(&self.game)));

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.last_frame = Instant::now();
        Ok(())
    }

    /// React to a piece coming to rest
    fn handle_lock(&mut self, event_loop: &ActiveEventLoop, outcome: LockOutcome) {
        if outcome.choosing && self.config.puzzle.choice_mode == ChoiceMode::Console {
            let options = self.game.catalog().names();
            let stdin = io::stdin();
            let result = prompt_choice(&mut stdin.lock(), &mut io::stdout(), &options);
            match result {
                Ok(index) => {
                    self.game.choose_shape(index);
                }
                Err(e) => self.fail(event_loop, e.to_string()),
            }
            // Time spent at the prompt does not count as gravity
            self.last_frame = Instant::now();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        if let Some(outcome) = self.game.tick(dt) {
            self.handle_lock(event_loop, outcome);
        }

        // A chosen piece with no room also loses without a lock outcome
        if self.loss_timer.update(self.game.is_lost(), now) {
            log::info!("Exiting after loss");
            event_loop.exit();
            return;
        }

        if let Some(window) = &mut self.window {
            window.update_title(Some(&puzzle_status(&self.game)));
        }

        let Some(renderer) = &mut self.renderer else {
            return;
        };
        match renderer.render_frame(&self.game) {
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
                        Some(InputAction::Exit) => {
                            event_loop.exit();
                            return;
                        }
                        Some(InputAction::ToggleFullscreen) => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                            return;
                        }
                        None => {}
                    }

                    if let Some(action) = PuzzleController::map_key(key, event.state, self.game.phase()) {
                        log::debug!("Puzzle action {:?}", action);
                        let was_choosing = matches!(self.game.phase(), Phase::Choosing(_));
                        self.game.apply(action);
                        if was_choosing && !self.game.is_choosing() {
                            self.last_frame = Instant::now();
                        }
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

fn run(config: AppConfig) -> Result<bool, Box<dyn Error>> {
    let catalog = config.puzzle.catalog()?;
    let block_image = load_block_image(&config.puzzle.image_path, config.puzzle.block_size)?;
    let font = load_font(&config.puzzle.font_path)?;
    log::info!(
        "Loaded block image {} at {}px, font {}, {} shape(s), choice mode {:?}",
        config.puzzle.image_path,
        config.puzzle.block_size,
        config.puzzle.font_path,
        catalog.len(),
        config.puzzle.choice_mode
    );

    let game = Game::new(config.puzzle.game_settings(), catalog);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, game, block_image, font);
    event_loop.run_app(&mut app)?;

    log::info!("Final score: {}", app.game.score());
    Ok(app.failure.is_none())
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
    log::info!("Starting {}", config.puzzle.window.title);

    match run(config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
