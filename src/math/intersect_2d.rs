use super::{Point2, TOLERANCE};

/// Twice the signed area of the triangle `a, b, c`.
///
/// Positive when `c` lies to the left of `a → b` (counter-clockwise turn).
#[must_use]
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Strict proper-crossing test for segments `a0 → a1` and `b0 → b1`.
///
/// Each segment's endpoints must lie strictly on opposite sides of the
/// other. Touching at an endpoint and collinear overlap are not crossings;
/// use [`collinear_overlap`] for the latter.
#[must_use]
pub fn segments_intersect(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> bool {
    let o1 = orientation(a0, a1, b0);
    let o2 = orientation(a0, a1, b1);
    let o3 = orientation(b0, b1, a0);
    let o4 = orientation(b0, b1, a1);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

/// Length of the 1D overlap of two segments projected onto the axis of `a0 → a1`.
///
/// The segments are assumed collinear (callers check direction and
/// adjacency first). Returns `0.0` for disjoint projections or a
/// zero-length reference segment.
#[must_use]
pub fn collinear_overlap(a0: &Point2, a1: &Point2, b0: &Point2, b1: &Point2) -> f64 {
    let axis = a1 - a0;
    let len = axis.norm();
    if len < TOLERANCE {
        return 0.0;
    }
    let axis = axis / len;

    let ta = (0.0_f64, len);
    let tb0 = (b0 - a0).dot(&axis);
    let tb1 = (b1 - a0).dot(&axis);
    let tb = (tb0.min(tb1), tb0.max(tb1));

    (ta.1.min(tb.1) - ta.0.max(tb.0)).max(0.0)
}
