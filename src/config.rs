//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TOYBOX_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use toybox_fractal::AnimatorSettings;
use toybox_puzzle::{GameSettings, Rgb, ShapeCatalog, ShapeConfig, ShapeError, DEFAULT_COLORS};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Fractal wireframe demo
    #[serde(default)]
    pub fractal: FractalConfig,
    /// Cat Tetris
    #[serde(default)]
    pub puzzle: PuzzleConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`TOYBOX_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TOYBOX_PUZZLE__FALL_SPEED=0.5 -> puzzle.fall_speed = 0.5
        figment = figment.merge(Env::prefixed("TOYBOX_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title (the puzzle appends the score)
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Toybox".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position [x, y, z]
    pub eye: [f32; 3],
    /// Point the camera looks at
    pub target: [f32; 3],
    /// Up direction
    pub up: [f32; 3],
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 0.0, 6.0],
            target: [0.0, 0.0, 0.0],
            up: [0.0, 1.0, 0.0],
            fov: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Fractal wireframe configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Background color [r, g, b, a]
    pub clear_color: [f32; 4],
    /// Wireframe color [r, g, b, a]
    pub line_color: [f32; 4],
    /// Deepest subdivision level
    pub max_depth: u32,
    /// Seconds between growth steps
    pub recursion_delay: f64,
    /// Time divisor for the model scale
    pub scale_factor: f32,
}

impl Default for FractalConfig {
    fn default() -> Self {
        let animator = AnimatorSettings::default();
        Self {
            window: WindowConfig {
                title: "Dynamic Fractal Geometry".to_string(),
                ..WindowConfig::default()
            },
            camera: CameraConfig::default(),
            clear_color: [0.1, 0.1, 0.1, 1.0],
            line_color: [0.6, 0.4, 1.0, 1.0],
            max_depth: animator.max_depth,
            recursion_delay: animator.recursion_delay,
            scale_factor: animator.scale_factor,
        }
    }
}

impl FractalConfig {
    pub fn animator_settings(&self) -> AnimatorSettings {
        AnimatorSettings {
            max_depth: self.max_depth,
            recursion_delay: self.recursion_delay,
            scale_factor: self.scale_factor,
        }
    }
}

/// Where the next piece is picked after a four-row clear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceMode {
    /// Arrow keys and Enter in the game window
    #[default]
    Window,
    /// Numbered prompt on stdin/stdout
    Console,
}

/// Cat Tetris configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PuzzleConfig {
    pub window: WindowConfig,
    /// Side of one block in pixels
    pub block_size: u32,
    /// Board width in cells
    pub grid_width: i32,
    /// Board height in cells
    pub grid_height: i32,
    /// Seconds between gravity steps
    pub fall_speed: f32,
    /// Colors new pieces are drawn from
    pub colors: Vec<Rgb>,
    /// Image drawn for every occupied cell
    pub image_path: String,
    /// Font used for the title, score and chooser labels
    pub font_path: String,
    /// Multiply the block image by the piece color
    pub tint_blocks: bool,
    /// Grid line color
    pub grid_line_color: Rgb,
    /// Piece shapes; the cat column when empty
    pub shapes: Vec<ShapeConfig>,
    /// How the next piece is chosen after a four-row clear
    pub choice_mode: ChoiceMode,
    /// Seconds "YOU LOST" stays up before exiting
    pub lost_delay: f32,
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "Cat Tetris".to_string(),
                width: 300,
                height: 600,
                ..WindowConfig::default()
            },
            block_size: 30,
            grid_width: 10,
            grid_height: 20,
            fall_speed: 0.27,
            colors: DEFAULT_COLORS.to_vec(),
            image_path: "assets/olli-the-polite-cat.png".to_string(),
            font_path: "assets/fonts/DejaVuSans.ttf".to_string(),
            tint_blocks: false,
            grid_line_color: [128, 128, 128],
            shapes: vec![ShapeConfig::cat_i()],
            choice_mode: ChoiceMode::Window,
            lost_delay: 2.0,
        }
    }
}

impl PuzzleConfig {
    pub fn game_settings(&self) -> GameSettings {
        let colors = if self.colors.is_empty() {
            DEFAULT_COLORS.to_vec()
        } else {
            self.colors.clone()
        };
        GameSettings {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            fall_speed: self.fall_speed,
            colors,
        }
    }

    /// Parse the configured shapes
    pub fn catalog(&self) -> Result<ShapeCatalog, ShapeError> {
        if self.shapes.is_empty() {
            return Ok(ShapeCatalog::cat_pieces());
        }
        ShapeCatalog::from_configs(&self.shapes)
    }

    /// Board size in pixels
    pub fn board_size(&self) -> (u32, u32) {
        (
            self.grid_width.max(0) as u32 * self.block_size,
            self.grid_height.max(0) as u32 * self.block_size,
        )
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.fractal.window.width, 800);
        assert_eq!(config.fractal.max_depth, 5);
        assert_eq!(config.puzzle.window.title, "Cat Tetris");
        assert_eq!(config.puzzle.board_size(), (300, 600));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("recursion_delay"));
        assert!(toml.contains("choice_mode = \"window\""));
    }

    #[test]
    fn test_animator_settings_from_config() {
        let mut config = FractalConfig::default();
        config.max_depth = 3;
        let settings = config.animator_settings();
        assert_eq!(settings.max_depth, 3);
        assert_eq!(settings.recursion_delay, 0.25);
    }

    #[test]
    fn test_empty_palette_falls_back() {
        let mut config = PuzzleConfig::default();
        config.colors.clear();
        assert_eq!(config.game_settings().colors.len(), 7);
    }

    #[test]
    fn test_default_catalog_is_cat_column() {
        let catalog = PuzzleConfig::default().catalog().unwrap();
        assert_eq!(catalog.names(), vec!["I".to_string()]);
    }
}
