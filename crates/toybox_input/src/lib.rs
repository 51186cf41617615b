//! Keyboard handling for the toybox games
//!
//! This crate turns raw winit key events into puzzle actions.

mod puzzle_controller;

pub use puzzle_controller::PuzzleController;
