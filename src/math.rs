//! Vector and matrix helpers on top of `glam`.
//!
//! Matrices compose right to left: `a * b` applies `b` first.

use glam::{Mat3, Mat4, Vec3};

const SINGULAR_EPSILON: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum MathError {
    #[error("cannot normalize a zero-length vector")]
    ZeroLength,
    #[error("matrix is singular (determinant {0})")]
    Singular(f32),
}

pub fn normalize(v: Vec3) -> Result<Vec3, MathError> {
    v.try_normalize().ok_or(MathError::ZeroLength)
}

pub fn invert(m: Mat4) -> Result<Mat4, MathError> {
    let determinant = m.determinant();
    if !determinant.is_finite() || determinant.abs() < SINGULAR_EPSILON {
        return Err(MathError::Singular(determinant));
    }

    Ok(m.inverse())
}

pub fn transpose(m: Mat4) -> Mat4 {
    m.transpose()
}

/// Upper 3x3 of the inverse transpose, for transforming normals.
pub fn normal_matrix(m: Mat4) -> Result<Mat3, MathError> {
    Ok(Mat3::from_mat4(transpose(invert(m)?)))
}

pub fn make_rotation_x(angle: f32) -> Mat4 {
    Mat4::from_rotation_x(angle)
}

pub fn make_rotation_y(angle: f32) -> Mat4 {
    Mat4::from_rotation_y(angle)
}

pub fn make_rotation_z(angle: f32) -> Mat4 {
    Mat4::from_rotation_z(angle)
}

pub fn make_translation(translation: Vec3) -> Mat4 {
    Mat4::from_translation(translation)
}

pub fn make_scaling(sx: f32, sy: f32, sz: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(sx, sy, sz))
}

/// Right-handed projection into OpenGL clip space (`w = -z`, depth in [-1, 1]).
pub fn make_perspective_projection(fov_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh_gl(fov_radians, aspect, near, far)
}

/// Applies `m` to `p` as a homogeneous point, dividing by the resulting `w`.
pub fn transform_point(m: Mat4, p: Vec3) -> Vec3 {
    m.project_point3(p)
}

pub fn quadratic_bezier(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    let u = 1.0 - t;
    u * u * p0 + 2.0 * u * t * p1 + t * t * p2
}

pub fn quadratic_bezier_tangent(p0: Vec3, p1: Vec3, p2: Vec3, t: f32) -> Vec3 {
    2.0 * (1.0 - t) * (p1 - p0) + 2.0 * t * (p2 - p1)
}
