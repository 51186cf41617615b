//! Application systems
//!
//! The window wrapper shared by both programs, one render system each, and
//! the loss timer for Cat Tetris.

mod window;
mod fractal_render;
mod puzzle_render;
mod loss_timer;

pub use window::{format_title, WindowError, WindowSystem};
pub use fractal_render::{camera_matrices, FractalRenderSystem};
pub use puzzle_render::{build_board_batch, puzzle_status, BoardLayout, PuzzleRenderSystem};
pub use loss_timer::LossTimer;
