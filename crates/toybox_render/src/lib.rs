//! Rendering Library
//!
//! This crate provides the wgpu-based rendering used by both toybox programs.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::LinePipeline`] - Indexed 3D line rendering (the fractal wireframe)
//! - [`pipeline::SpritePipeline`] - 2D pixel-space quads and lines (the puzzle board)
//! - [`pipeline::SpriteBatch`] - CPU-side list of quads and lines for one frame
//! - [`texture`] - Loading the block image from disk
//! - [`text::GlyphAtlas`] - fontdue glyph rasterization and atlas packing for labels

pub mod context;
pub mod pipeline;
pub mod text;
pub mod texture;

pub use context::{RenderContext, RenderError};
pub use pipeline::{LinePipeline, LineUniforms, SpriteBatch, SpritePipeline, SpriteVertex, Rect};
pub use text::{load_font, GlyphAtlas};
pub use texture::{load_block_image, AssetError};
