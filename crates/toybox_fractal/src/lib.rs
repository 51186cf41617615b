//! Fractal geometry for the toybox wireframe demo
//!
//! - [`FractalMesh`] - Growing vertex/face lists with a shared midpoint cache
//! - [`Face`] - A triangle given by three vertex indices
//! - [`FractalAnimator`] - Decides when the mesh grows and how it is posed each frame

mod mesh;
mod animator;

pub use mesh::{FractalMesh, Face, BASE_TETRAHEDRON, BASE_FACES};
pub use animator::{FractalAnimator, AnimatorSettings, StepOutcome};
