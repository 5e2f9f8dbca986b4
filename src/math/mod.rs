pub mod angle_2d;
pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global tolerance for exact-arithmetic guards (zero-length vectors, parallel lines).
pub const TOLERANCE: f64 = 1e-10;

/// Below this absolute area a polygon is degenerate and has no centroid.
pub const AREA_EPSILON: f64 = 1e-6;

/// Tolerance for stitching wall endpoints into room boundaries.
pub const STITCH_TOLERANCE: f64 = 0.5;

/// Tolerance for snapping and de-duplicating imported geometry.
pub const CLEAN_EPSILON: f64 = 1e-3;

/// Tolerance for attaching doors and windows to walls.
pub const ATTACH_TOLERANCE: f64 = 8.0;

/// Returns `true` if two points are within `tolerance` of each other.
#[must_use]
pub fn points_equal(a: &Point2, b: &Point2, tolerance: f64) -> bool {
    nalgebra::distance(a, b) < tolerance
}

/// Returns `true` if both coordinates of the point are finite.
#[must_use]
pub fn is_finite_point(p: &Point2) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
