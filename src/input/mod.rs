//! Input handling module
//!
//! Provides input mapping from raw events to application actions. Puzzle
//! controls live in `toybox_input`.

mod input_mapper;

pub use input_mapper::{InputMapper, InputAction};
