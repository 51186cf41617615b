//! Game state machine
//!
//! A [`Game`] is in one of three phases:
//! - `Playing` - the current piece falls under gravity and responds to input
//! - `Choosing` - four rows were cleared at once; the player picks the next piece
//! - `Lost` - a block came to rest in the top row, or a new piece could not spawn

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::chooser::PieceChooser;
use crate::grid::{check_lost, clear_rows, Grid, LockedPositions, Rgb};
use crate::piece::Piece;
use crate::shape::ShapeCatalog;

/// Pastel block colors
pub const DEFAULT_COLORS: [Rgb; 7] = [
    [255, 182, 193], // Light Pink
    [255, 160, 122], // Light Salmon
    [255, 228, 181], // Moccasin
    [240, 230, 140], // Khaki
    [152, 251, 152], // Pale Green
    [175, 238, 238], // Pale Turquoise
    [216, 191, 216], // Thistle
];

/// Board size, gravity, and palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSettings {
    /// Board width in cells
    pub grid_width: i32,
    /// Board height in cells
    pub grid_height: i32,
    /// Seconds between gravity steps
    pub fall_speed: f32,
    /// Colors new pieces are drawn from
    pub colors: Vec<Rgb>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            grid_width: 10,
            grid_height: 20,
            fall_speed: 0.27,
            colors: DEFAULT_COLORS.to_vec(),
        }
    }
}

impl GameSettings {
    /// Column new pieces spawn at
    pub fn spawn_x(&self) -> i32 {
        self.grid_width / 2 - 2
    }
}

/// Player input, already translated from keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleAction {
    MoveLeft,
    MoveRight,
    /// Move down one row (never locks the piece)
    SoftDrop,
    Rotate,
    /// Highlight the previous chooser option
    ChoicePrev,
    /// Highlight the next chooser option
    ChoiceNext,
    /// Take the highlighted chooser option
    ConfirmChoice,
}

/// Current phase of the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Choosing(PieceChooser),
    Lost,
}

/// Result of a piece coming to rest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    /// Rows removed by this lock
    pub rows_cleared: u32,
    /// Score after the lock
    pub score: u32,
    /// The player now has to choose the next piece
    pub choosing: bool,
    /// The game is over
    pub lost: bool,
}

/// A single game of Cat Tetris
pub struct Game {
    settings: GameSettings,
    catalog: ShapeCatalog,
    locked: LockedPositions,
    current: Piece,
    phase: Phase,
    score: u32,
    fall_timer: f32,
    rng: StdRng,
}

impl Game {
    /// Start a game seeded from the OS
    pub fn new(settings: GameSettings, catalog: ShapeCatalog) -> Self {
        Self::with_rng(settings, catalog, StdRng::from_os_rng())
    }

    /// Start a game with a given random source (for reproducible games)
    pub fn with_rng(settings: GameSettings, catalog: ShapeCatalog, mut rng: StdRng) -> Self {
        let current = Self::random_piece(&settings, &catalog, &mut rng);
        log::info!(
            "New game on a {}x{} board with {} shape(s)",
            settings.grid_width,
            settings.grid_height,
            catalog.len()
        );

        Self {
            settings,
            catalog,
            locked: LockedPositions::new(),
            current,
            phase: Phase::Playing,
            score: 0,
            fall_timer: 0.0,
            rng,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn catalog(&self) -> &ShapeCatalog {
        &self.catalog
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn locked(&self) -> &LockedPositions {
        &self.locked
    }

    /// Mutable access to locked cells (for setting up boards)
    pub fn locked_mut(&mut self) -> &mut LockedPositions {
        &mut self.locked
    }

    pub fn is_lost(&self) -> bool {
        self.phase == Phase::Lost
    }

    pub fn is_choosing(&self) -> bool {
        matches!(self.phase, Phase::Choosing(_))
    }

    /// Board of locked cells only
    fn board(&self) -> Grid {
        Grid::from_locked(self.settings.grid_width, self.settings.grid_height, &self.locked)
    }

    /// Board as it should be drawn: locked cells plus the falling piece
    pub fn grid(&self) -> Grid {
        let mut grid = self.board();
        if self.phase == Phase::Playing {
            for (x, y) in self.current.cells() {
                if y > -1 {
                    grid.set(x, y, self.current.color);
                }
            }
        }
        grid
    }

    /// Advance gravity by `dt` seconds
    ///
    /// Returns the lock outcome when the piece came to rest during this tick.
    pub fn tick(&mut self, dt: f32) -> Option<LockOutcome> {
        if self.phase != Phase::Playing {
            return None;
        }

        self.fall_timer += dt;
        if self.fall_timer < self.settings.fall_speed {
            return None;
        }
        self.fall_timer = 0.0;

        self.current.y += 1;
        if !self.board().is_valid(&self.current) && self.current.y > 0 {
            self.current.y -= 1;
            return Some(self.lock_current());
        }
        None
    }

    /// Apply a player action; actions that do not fit the phase are ignored
    pub fn apply(&mut self, action: PuzzleAction) {
        if self.phase == Phase::Playing {
            match action {
                PuzzleAction::MoveLeft => self.try_move(|p| p.x -= 1, |p| p.x += 1),
                PuzzleAction::MoveRight => self.try_move(|p| p.x += 1, |p| p.x -= 1),
                PuzzleAction::SoftDrop => self.try_move(|p| p.y += 1, |p| p.y -= 1),
                PuzzleAction::Rotate => self.try_move(|p| p.rotation += 1, |p| p.rotation -= 1),
                _ => {}
            }
            return;
        }

        let confirmed = match &mut self.phase {
            Phase::Choosing(chooser) => match action {
                PuzzleAction::ChoicePrev => {
                    chooser.select_prev();
                    None
                }
                PuzzleAction::ChoiceNext => {
                    chooser.select_next();
                    None
                }
                PuzzleAction::ConfirmChoice => Some(chooser.selected()),
                _ => None,
            },
            _ => None,
        };

        if let Some(index) = confirmed {
            self.choose_shape(index);
        }
    }

    /// Finish a choice by catalog index; returns false when not choosing or out of range
    pub fn choose_shape(&mut self, index: usize) -> bool {
        if !self.is_choosing() {
            return false;
        }
        let Some(shape) = self.catalog.get(index).cloned() else {
            return false;
        };

        log::info!("Player chose shape '{}'", shape.name());
        let color = self.random_color();
        self.phase = Phase::Playing;
        self.spawn(Piece::new(self.settings.spawn_x(), 0, shape, color));
        true
    }

    fn try_move(&mut self, step: impl Fn(&mut Piece), undo: impl Fn(&mut Piece)) {
        step(&mut self.current);
        if !self.board().is_valid(&self.current) {
            undo(&mut self.current);
        }
    }

    fn lock_current(&mut self) -> LockOutcome {
        self.locked.lock_piece(&self.current);
        let rows_cleared = clear_rows(
            &mut self.locked,
            self.settings.grid_width,
            self.settings.grid_height,
        );
        self.score += rows_cleared;
        log::debug!(
            "Locked piece '{}' at ({}, {})",
            self.current.shape.name(),
            self.current.x,
            self.current.y
        );
        if rows_cleared > 0 {
            log::info!("Cleared {} row(s), score {}", rows_cleared, self.score);
        }

        if check_lost(&self.locked) {
            self.lose();
        } else if rows_cleared == 4 {
            self.phase = Phase::Choosing(PieceChooser::new(self.catalog.names()));
        } else {
            let piece = Self::random_piece(&self.settings, &self.catalog, &mut self.rng);
            self.spawn(piece);
        }

        LockOutcome {
            rows_cleared,
            score: self.score,
            choosing: self.is_choosing(),
            lost: self.is_lost(),
        }
    }

    fn spawn(&mut self, piece: Piece) {
        self.current = piece;
        if !self.board().is_valid(&self.current) {
            log::info!("New piece has no room to spawn");
            self.lose();
        }
    }

    fn lose(&mut self) {
        log::info!("Game over with score {}", self.score);
        self.phase = Phase::Lost;
    }

    fn random_color(&mut self) -> Rgb {
        Self::pick_color(&self.settings, &mut self.rng)
    }

    fn pick_color(settings: &GameSettings, rng: &mut StdRng) -> Rgb {
        settings
            .colors
            .choose(rng)
            .copied()
            .unwrap_or(DEFAULT_COLORS[0])
    }

    fn random_piece(settings: &GameSettings, catalog: &ShapeCatalog, rng: &mut StdRng) -> Piece {
        let index = rng.random_range(0..catalog.len());
        let shape = catalog.shapes()[index].clone();
        let color = Self::pick_color(settings, rng);
        Piece::new(settings.spawn_x(), 0, shape, color)
    }
}
