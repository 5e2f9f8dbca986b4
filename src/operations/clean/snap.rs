use crate::math::Point2;

/// Quantizes a value to the nearest multiple of `epsilon`.
#[must_use]
pub fn snap_value(value: f64, epsilon: f64) -> f64 {
    if epsilon <= 0.0 {
        return value;
    }
    (value / epsilon).round() * epsilon
}

/// Quantizes a point to the `epsilon` grid.
#[must_use]
pub fn snap_point(p: &Point2, epsilon: f64) -> Point2 {
    Point2::new(snap_value(p.x, epsilon), snap_value(p.y, epsilon))
}

/// Quantizes every coordinate to the nearest multiple of `epsilon`.
///
/// Deterministic and idempotent. A non-positive `epsilon` leaves the points unchanged.
#[must_use]
pub fn snap_coordinates(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    points.iter().map(|p| snap_point(p, epsilon)).collect()
}
