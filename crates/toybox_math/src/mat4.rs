//! 4x4 Matrix utilities for 3D transformations
//!
//! Matrices are column-major (`m[col][row]`), which is the layout WGSL expects
//! for `mat4x4<f32>` uniforms. Projection matrices target wgpu's clip space,
//! where depth runs from 0 (near) to 1 (far).

use crate::Vec3;

/// 4x4 matrix type (column-major)
pub type Mat4 = [[f32; 4]; 4];

/// Identity matrix
pub const IDENTITY: Mat4 = [
    [1.0, 0.0, 0.0, 0.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
];

/// Multiply two 4x4 matrices: result = a * b
///
/// In column-major convention, this applies b first, then a.
#[allow(clippy::needless_range_loop)]
pub fn mul(a: Mat4, b: Mat4) -> Mat4 {
    let mut result = [[0.0f32; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            for k in 0..4 {
                result[i][j] += a[k][j] * b[i][k];
            }
        }
    }

    result
}

/// Transform a homogeneous vector by a matrix: result = M * v
pub fn transform(m: Mat4, v: [f32; 4]) -> [f32; 4] {
    [
        m[0][0] * v[0] + m[1][0] * v[1] + m[2][0] * v[2] + m[3][0] * v[3],
        m[0][1] * v[0] + m[1][1] * v[1] + m[2][1] * v[2] + m[3][1] * v[3],
        m[0][2] * v[0] + m[1][2] * v[1] + m[2][2] * v[2] + m[3][2] * v[3],
        m[0][3] * v[0] + m[1][3] * v[1] + m[2][3] * v[2] + m[3][3] * v[3],
    ]
}

/// Transform a point (w = 1) and drop the w component
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    let r = transform(m, [p.x, p.y, p.z, 1.0]);
    Vec3::new(r[0], r[1], r[2])
}

/// Right-handed perspective projection with a 0..1 depth range
///
/// # Arguments
/// * `fov_y` - Vertical field of view in radians
/// * `aspect` - Width divided by height
/// * `near`, `far` - Clipping plane distances (both positive)
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y / 2.0).tan();
    let nf = 1.0 / (near - far);

    [
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, far * nf, -1.0],
        [0.0, 0.0, near * far * nf, 0.0],
    ]
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let f = (target - eye).normalized();
    let s = f.cross(up).normalized();
    let u = s.cross(f);

    [
        [s.x, u.x, -f.x, 0.0],
        [s.y, u.y, -f.y, 0.0],
        [s.z, u.z, -f.z, 0.0],
        [-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0],
    ]
}

/// Rotation by `angle` radians around `axis`
///
/// The axis is normalized first, so any non-zero length works.
pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Mat4 {
    let a = axis.normalized();
    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    [
        [c + t * a.x * a.x, t * a.x * a.y + s * a.z, t * a.x * a.z - s * a.y, 0.0],
        [t * a.x * a.y - s * a.z, c + t * a.y * a.y, t * a.y * a.z + s * a.x, 0.0],
        [t * a.x * a.z + s * a.y, t * a.y * a.z - s * a.x, c + t * a.z * a.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

/// Uniform scale matrix
pub fn scale_uniform(s: f32) -> Mat4 {
    [
        [s, 0.0, 0.0, 0.0],
        [0.0, s, 0.0, 0.0],
        [0.0, 0.0, s, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        for i in 0..4 {
            for j in 0..4 {
                if !approx_eq(a[i][j], b[i][j]) {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(transform_point(IDENTITY, p), p));
    }

    #[test]
    fn test_rotation_about_z() {
        let m = rotation_axis_angle(Vec3::Z, FRAC_PI_2);
        let result = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(result, Vec3::Y), "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_axis_is_normalized() {
        let a = rotation_axis_angle(Vec3::new(0.0, 0.0, 5.0), 0.7);
        let b = rotation_axis_angle(Vec3::Z, 0.7);
        assert!(mat_approx_eq(a, b));
    }

    #[test]
    fn test_mul_identity() {
        let a = rotation_axis_angle(Vec3::new(1.0, 2.0, 3.0), 0.5);
        assert!(mat_approx_eq(mul(IDENTITY, a), a));
        assert!(mat_approx_eq(mul(a, IDENTITY), a));
    }

    #[test]
    fn test_mul_applies_right_first() {
        // Scale then rotate: X scaled to 2X, then rotated to 2Y
        let m = mul(rotation_axis_angle(Vec3::Z, FRAC_PI_2), scale_uniform(2.0));
        let result = transform_point(m, Vec3::X);
        assert!(vec_approx_eq(result, Vec3::new(0.0, 2.0, 0.0)), "got {:?}", result);
    }

    #[test]
    fn test_look_at_moves_target_in_front() {
        let view = look_at(Vec3::new(0.0, 0.0, 6.0), Vec3::ZERO, Vec3::Y);
        let result = transform_point(view, Vec3::ZERO);
        // Camera looks down -Z in view space
        assert!(vec_approx_eq(result, Vec3::new(0.0, 0.0, -6.0)), "got {:?}", result);
    }

    #[test]
    fn test_perspective_depth_range() {
        let (near, far) = (0.1, 100.0);
        let proj = perspective(45f32.to_radians(), 800.0 / 600.0, near, far);

        let at_near = transform(proj, [0.0, 0.0, -near, 1.0]);
        assert!(approx_eq(at_near[2] / at_near[3], 0.0));

        let at_far = transform(proj, [0.0, 0.0, -far, 1.0]);
        assert!(approx_eq(at_far[2] / at_far[3], 1.0));
    }
}
