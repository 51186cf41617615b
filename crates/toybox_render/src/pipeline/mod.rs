//! Rendering pipeline components
//!
//! This module contains the line pipeline for 3D wireframes and the sprite
//! pipeline for 2D boards.

pub mod types;
pub mod line_pipeline;
pub mod sprite_batch;
pub mod sprite_pipeline;

// Re-export types
pub use types::{LineUniforms, ScreenUniforms, SpriteVertex};

// Re-export pipelines
pub use line_pipeline::LinePipeline;
pub use sprite_batch::{Rect, SpriteBatch};
pub use sprite_pipeline::SpritePipeline;
