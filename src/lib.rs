//! Toybox - a fractal wireframe demo and Cat Tetris
//!
//! The shared application layer for the `fractal` and `cat_tetris` binaries:
//!
//! - [`config`] - Layered configuration (TOML files and `TOYBOX_*` environment variables)
//! - [`input`] - Application-level key mapping (exit, fullscreen)
//! - [`systems`] - Window management and the per-program render systems

pub mod config;
pub mod input;
pub mod systems;
