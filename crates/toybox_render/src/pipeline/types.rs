//! GPU-compatible data types for the line and sprite pipelines
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use toybox_math::Mat4;

/// Uniforms for the wireframe line shader
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LineUniforms {
    /// Object to world transform
    pub model: Mat4,
    /// World to camera transform
    pub view: Mat4,
    /// Camera to clip transform
    pub projection: Mat4,
    /// RGBA line color
    pub color: [f32; 4],
}

impl Default for LineUniforms {
    fn default() -> Self {
        Self {
            model: toybox_math::mat4::IDENTITY,
            view: toybox_math::mat4::IDENTITY,
            projection: toybox_math::mat4::IDENTITY,
            color: [1.0; 4],
        }
    }
}

/// A corner of a 2D quad or an end of a 2D line, in window pixels
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    /// Pixel position, origin at the top-left corner
    pub position: [f32; 2],
    /// Texture coordinate into the block image
    pub uv: [f32; 2],
    /// RGBA tint, or the flat color when untextured
    pub color: [f32; 4],
    /// 1.0 samples the block image, 0.0 draws `color` alone
    pub textured: f32,
    /// Padding to keep the stride a multiple of 8
    pub _padding: f32,
}

impl SpriteVertex {
    pub fn textured(position: [f32; 2], uv: [f32; 2], tint: [f32; 4]) -> Self {
        Self {
            position,
            uv,
            color: tint,
            textured: 1.0,
            _padding: 0.0,
        }
    }

    pub fn solid(position: [f32; 2], color: [f32; 4]) -> Self {
        Self {
            position,
            uv: [0.0, 0.0],
            color,
            textured: 0.0,
            _padding: 0.0,
        }
    }
}

/// Size of the logical drawing area the sprite shader maps to clip space
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ScreenUniforms {
    /// Width and height in pixels
    pub size: [f32; 2],
    /// Padding to align to 16 bytes
    pub _padding: [f32; 2],
}

impl ScreenUniforms {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: [width, height],
            _padding: [0.0; 2],
        }
    }
}

impl Default for ScreenUniforms {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
