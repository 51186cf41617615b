//! 3D Mathematics Library
//!
//! This crate provides the small amount of linear algebra the toybox demos need.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix used for model/view/projection transforms

mod vec3;
pub mod mat4;

pub use vec3::Vec3;
pub use mat4::Mat4;
