//! Cat Tetris game rules
//!
//! This crate holds everything about the puzzle that does not touch a window:
//!
//! - [`Shape`] / [`ShapeCatalog`] - Piece patterns, parsed from `C`-cell text rows
//! - [`Piece`] - A shape placed on the board with a color and rotation
//! - [`Grid`] - Cell colors built from [`LockedPositions`] plus the falling piece
//! - [`clear_rows`] / [`check_lost`] - Row clearing and the loss condition
//! - [`Game`] - The state machine driven by gravity ticks and [`PuzzleAction`]s
//! - [`PieceChooser`] / [`prompt_choice`] - Picking the next piece after a four-row clear

mod shape;
mod piece;
mod grid;
mod chooser;
mod game;

pub use shape::{Shape, ShapeCatalog, ShapeConfig, ShapeError, CAT_I_PATTERN};
pub use piece::Piece;
pub use grid::{Grid, LockedPositions, Rgb, clear_rows, check_lost};
pub use chooser::{PieceChooser, PromptError, prompt_choice};
pub use game::{Game, GameSettings, Phase, PuzzleAction, LockOutcome, DEFAULT_COLORS};
