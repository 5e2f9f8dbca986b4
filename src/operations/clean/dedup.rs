use crate::math::Point2;

/// Drops each point closer than `epsilon` to the previously retained point.
///
/// Order-sensitive: only consecutive runs collapse.
#[must_use]
pub fn remove_duplicates(points: &[Point2], epsilon: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if let Some(last) = out.last() {
            if nalgebra::distance(last, p) < epsilon {
                continue;
            }
        }
        out.push(*p);
    }
    out
}
