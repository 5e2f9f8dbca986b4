use std::f64::consts::PI;

use super::{Vector2, TOLERANCE};

/// Normalizes an angle in degrees to `[0, 360)`.
#[must_use]
pub fn normalize_degrees(angle: f64) -> f64 {
    let r = angle % 360.0;
    if r < 0.0 {
        r + 360.0
    } else {
        r
    }
}

/// Angle in radians between two direction vectors, in `[0, π]`.
///
/// Returns `None` if either vector has zero length.
#[must_use]
pub fn angle_between(u: &Vector2, v: &Vector2) -> Option<f64> {
    let nu = u.norm();
    let nv = v.norm();
    if nu < TOLERANCE || nv < TOLERANCE {
        return None;
    }
    let cos = (u.dot(v) / (nu * nv)).clamp(-1.0, 1.0);
    Some(cos.acos())
}

/// Angle in radians between the supporting lines of two vectors, in `[0, π/2]`.
///
/// Antiparallel vectors are considered aligned.
#[must_use]
pub fn axis_angle_between(u: &Vector2, v: &Vector2) -> Option<f64> {
    angle_between(u, v).map(|a| a.min(PI - a))
}
