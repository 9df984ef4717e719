//! Rotation matrix to quaternion to axis-angle conversion.

use glam::{DMat3, DQuat, DVec3};
use solvere_core::{AxisAngle, AxisNormalization, NEGLIGIBLE};

/// Added to the squared axis length in [`AxisNormalization::Legacy`].
pub const LEGACY_EPSILON: f64 = 1e-12;

/// Convert a rotation matrix to a quaternion.
///
/// Uses the trace when it is positive and otherwise the branch keyed on the
/// largest diagonal entry, so the divisor never approaches zero even near
/// 180 degree rotations. The result is not renormalized.
pub fn matrix_to_quaternion(m: &DMat3) -> DQuat {
    let e = |row: usize, col: usize| m.col(col)[row];
    let (m00, m01, m02) = (e(0, 0), e(0, 1), e(0, 2));
    let (m10, m11, m12) = (e(1, 0), e(1, 1), e(1, 2));
    let (m20, m21, m22) = (e(2, 0), e(2, 1), e(2, 2));

    let trace = m00 + m11 + m22;
    if trace > 0.0 {
        let s = 0.5 / (trace + 1.0).sqrt();
        DQuat::from_xyzw((m21 - m12) * s, (m02 - m20) * s, (m10 - m01) * s, 0.25 / s)
    } else if m00 > m11 && m00 > m22 {
        let s = 2.0 * (1.0 + m00 - m11 - m22).sqrt();
        DQuat::from_xyzw(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
    } else if m11 > m22 {
        let s = 2.0 * (1.0 + m11 - m00 - m22).sqrt();
        DQuat::from_xyzw((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
    } else {
        let s = 2.0 * (1.0 + m22 - m00 - m11).sqrt();
        DQuat::from_xyzw((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
    }
}

/// Convert a sequence of rotation matrices to quaternions.
pub fn to_quaternions(matrices: &[DMat3]) -> Vec<DQuat> {
    matrices.iter().map(matrix_to_quaternion).collect()
}

/// Split a quaternion into a rotation axis and an angle of `2 acos(w)`.
///
/// With [`AxisNormalization::Unit`] a vanishing vector part falls back to
/// the +Z axis and a NaN or infinite one to [`AxisAngle::IDENTITY`].
/// [`AxisNormalization::Legacy`] keeps the zero axis.
pub fn quaternion_to_axis_angle(q: DQuat, normalization: AxisNormalization) -> AxisAngle {
    let v = DVec3::new(q.x, q.y, q.z);
    let angle = 2.0 * q.w.clamp(-1.0, 1.0).acos();
    let len_sq = v.length_squared();

    match normalization {
        AxisNormalization::Legacy => AxisAngle::new(v / (LEGACY_EPSILON + len_sq), angle),
        AxisNormalization::Unit if !len_sq.is_finite() => AxisAngle::IDENTITY,
        AxisNormalization::Unit if len_sq <= NEGLIGIBLE => AxisAngle::new(DVec3::Z, angle),
        AxisNormalization::Unit => AxisAngle::new(v / len_sq.sqrt(), angle),
    }
}

/// Convert rotation matrices straight to axis-angle orientations.
pub fn to_orientations(matrices: &[DMat3], normalization: AxisNormalization) -> Vec<AxisAngle> {
    matrices
        .iter()
        .map(|m| quaternion_to_axis_angle(matrix_to_quaternion(m), normalization))
        .collect()
}

/// The rotation that turns `reference` onto `v`.
///
/// The axis is `-(v x reference)` normalized and the angle comes from the
/// dot product. Parallel, anti-parallel, zero or non-finite vectors have
/// no defined axis and yield [`AxisAngle::IDENTITY`].
pub fn vector_to_axis_angle(v: DVec3, reference: DVec3) -> AxisAngle {
    let axis = -v.cross(reference);
    let len_sq = axis.length_squared();
    if !len_sq.is_finite() || len_sq <= NEGLIGIBLE {
        return AxisAngle::IDENTITY;
    }

    let cos = v.dot(reference) / (v.length() * reference.length());
    AxisAngle::new(axis / len_sq.sqrt(), cos.clamp(-1.0, 1.0).acos())
}

/// Orient every vector relative to a shared reference direction.
pub fn to_axis_angles(vectors: &[DVec3], reference: DVec3) -> Vec<AxisAngle> {
    vectors
        .iter()
        .map(|v| vector_to_axis_angle(*v, reference))
        .collect()
}
