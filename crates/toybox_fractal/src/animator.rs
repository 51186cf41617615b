//! Growth schedule and pose for the fractal
//!
//! The animator steps the subdivision depth once per `recursion_delay` until
//! `max_depth` is reached, then keeps advancing the cycle counter. The model
//! matrix tumbles around a time-varying axis while the mesh scales up linearly.

use serde::{Deserialize, Serialize};
use toybox_math::{mat4, Mat4, Vec3};

use crate::FractalMesh;

/// Tuning values for [`FractalAnimator`]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimatorSettings {
    /// Deepest subdivision level the schedule reaches
    pub max_depth: u32,
    /// Seconds between growth steps
    pub recursion_delay: f64,
    /// Time divisor for the uniform scale (scale = t / scale_factor)
    pub scale_factor: f32,
}

impl Default for AnimatorSettings {
    fn default() -> Self {
        Self {
            max_depth: 5,
            recursion_delay: 0.25,
            scale_factor: 0.2,
        }
    }
}

/// What happened during a [`FractalAnimator::tick`] that grew the mesh
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Schedule depth after the step
    pub depth: u32,
    /// Depth actually passed to the subdivision
    pub subdivision_depth: u32,
    /// Line index count of the grown mesh
    pub index_count: usize,
}

/// Drives mesh growth over time
#[derive(Clone, Debug)]
pub struct FractalAnimator {
    settings: AnimatorSettings,
    current_depth: u32,
    cycle: u32,
    last_step: f64,
}

impl FractalAnimator {
    /// Create an animator whose first step happens `recursion_delay` after `start`
    pub fn new(settings: AnimatorSettings, start: f64) -> Self {
        Self {
            settings,
            current_depth: 0,
            cycle: 1,
            last_step: start,
        }
    }

    pub fn settings(&self) -> &AnimatorSettings {
        &self.settings
    }

    pub fn current_depth(&self) -> u32 {
        self.current_depth
    }

    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Advance the schedule to time `now` (seconds)
    ///
    /// Returns `Some` when the mesh grew and its buffers need re-uploading.
    /// Once the maximum depth is reached the mesh stops growing and every tick
    /// past the delay advances the cycle counter instead.
    pub fn tick(&mut self, now: f64, mesh: &mut FractalMesh) -> Option<StepOutcome> {
        if now - self.last_step <= self.settings.recursion_delay {
            return None;
        }

        if self.current_depth >= self.settings.max_depth {
            self.cycle = self.cycle.saturating_add(1);
            return None;
        }

        self.current_depth += 1;
        let subdivision_depth = self.current_depth % (10 * self.cycle);
        let index_count = mesh.grow(subdivision_depth, self.cycle);
        self.last_step = now;

        log::info!(
            "Fractal depth {} (subdivision {}): {} vertices, {} faces",
            self.current_depth,
            subdivision_depth,
            mesh.vertex_count(),
            mesh.face_count()
        );

        Some(StepOutcome {
            depth: self.current_depth,
            subdivision_depth,
            index_count,
        })
    }

    /// Model matrix at time `t` (seconds): tumble, then grow
    pub fn model_matrix(&self, t: f32) -> Mat4 {
        let rotation = mat4::rotation_axis_angle(Self::rotation_axis(t), t);
        let scale = mat4::scale_uniform(t / self.settings.scale_factor);
        mat4::mul(rotation, scale)
    }

    /// Rotation axis `(sin t, 1 / sin t, sin² t)`
    ///
    /// `1 / sin t` blows up whenever `sin t` is zero; +Y is used for those frames.
    pub fn rotation_axis(t: f32) -> Vec3 {
        let s = t.sin();
        let axis = Vec3::new(s, 1.0 / s, s * s);
        if axis.is_finite() && axis.length_squared() > 0.0 {
            axis
        } else {
            Vec3::Y
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> FractalAnimator {
        FractalAnimator::new(AnimatorSettings::default(), 0.0)
    }

    #[test]
    fn test_no_step_before_delay() {
        let mut anim = animator();
        let mut mesh = FractalMesh::tetrahedron();
        assert_eq!(anim.tick(0.25, &mut mesh), None);
        assert_eq!(anim.current_depth(), 0);
        assert_eq!(mesh.face_count(), 4);
    }

    #[test]
    fn test_step_after_delay() {
        let mut anim = animator();
        let mut mesh = FractalMesh::tetrahedron();
        let outcome = anim.tick(0.3, &mut mesh).unwrap();
        assert_eq!(outcome.depth, 1);
        assert_eq!(outcome.subdivision_depth, 1);
        assert_eq!(outcome.index_count, mesh.line_index_count());
        assert_eq!(mesh.face_count(), 8);
    }

    #[test]
    fn test_delay_restarts_after_step() {
        let mut anim = animator();
        let mut mesh = FractalMesh::tetrahedron();
        assert!(anim.tick(0.3, &mut mesh).is_some());
        assert!(anim.tick(0.5, &mut mesh).is_none());
        assert!(anim.tick(0.6, &mut mesh).is_some());
        assert_eq!(anim.current_depth(), 2);
    }

    #[test]
    fn test_stops_at_max_depth_and_advances_cycle() {
        let settings = AnimatorSettings { max_depth: 2, ..Default::default() };
        let mut anim = FractalAnimator::new(settings, 0.0);
        let mut mesh = FractalMesh::tetrahedron();

        assert!(anim.tick(1.0, &mut mesh).is_some());
        assert!(anim.tick(2.0, &mut mesh).is_some());
        let faces = mesh.face_count();

        assert!(anim.tick(3.0, &mut mesh).is_none());
        assert!(anim.tick(3.1, &mut mesh).is_none());
        assert_eq!(anim.current_depth(), 2);
        assert_eq!(anim.cycle(), 3);
        assert_eq!(mesh.face_count(), faces);
    }

    #[test]
    fn test_face_counts_through_full_schedule() {
        let mut anim = animator();
        let mut mesh = FractalMesh::tetrahedron();
        let mut counts = Vec::new();
        for step in 1..=5 {
            anim.tick(step as f64, &mut mesh).unwrap();
            counts.push(mesh.face_count());
        }
        assert_eq!(counts, vec![8, 16, 80, 1360, 23120]);
    }

    #[test]
    fn test_rotation_axis_singular_falls_back() {
        assert_eq!(FractalAnimator::rotation_axis(0.0), Vec3::Y);
        let axis = FractalAnimator::rotation_axis(1.0);
        assert!(axis.is_finite());
        assert!((axis.x - 1f32.sin()).abs() < 0.0001);
    }

    #[test]
    fn test_model_matrix_scales_with_time() {
        let anim = animator();
        // At t = 0 the rotation is the identity and the scale is zero
        let m = anim.model_matrix(0.0);
        let p = mat4::transform_point(m, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(p, Vec3::ZERO);

        // Length is preserved by the rotation, scale is t / 0.2
        let m = anim.model_matrix(1.0);
        let p = mat4::transform_point(m, Vec3::X);
        assert!((p.length() - 5.0).abs() < 0.001);
    }
}
