use crate::geometry::Segment;
use crate::math::angle_2d::angle_between;
use crate::math::points_equal;

/// Merges consecutive segments that continue each other in a straight line.
///
/// Two neighbours in list order are merged when they share an endpoint
/// (within `epsilon`, in any pairing) and the turn at the shared point is
/// below `angle_threshold_deg`. The merged segment runs from the first
/// segment's far endpoint to the second's and keeps the first segment's id
/// and thickness. Non-adjacent pairs are never merged.
#[must_use]
pub fn merge_collinear_segments(
    segments: &[Segment],
    epsilon: f64,
    angle_threshold_deg: f64,
) -> Vec<Segment> {
    let threshold = angle_threshold_deg.to_radians();
    let mut out = Vec::with_capacity(segments.len());
    let mut iter = segments.iter();
    let Some(first) = iter.next() else {
        return out;
    };

    let mut current = first.clone();
    for next in iter {
        if let Some(merged) = try_merge(&current, next, epsilon, threshold) {
            current = merged;
        } else {
            out.push(current);
            current = next.clone();
        }
    }
    out.push(current);
    out
}

/// Like [`merge_collinear_segments`], for the segments of a closed loop.
///
/// The last and first segments are neighbours too, so a loop drawn from a
/// point in the middle of a wall loses that seam vertex.
#[must_use]
pub fn merge_collinear_loop(
    segments: &[Segment],
    epsilon: f64,
    angle_threshold_deg: f64,
) -> Vec<Segment> {
    let mut out = merge_collinear_segments(segments, epsilon, angle_threshold_deg);
    if out.len() <= 3 {
        return out;
    }
    let (Some(last), Some(first)) = (out.last(), out.first()) else {
        return out;
    };
    if let Some(merged) = try_merge(last, first, epsilon, angle_threshold_deg.to_radians()) {
        out.pop();
        out[0] = merged;
    }
    out
}

fn try_merge(first: &Segment, second: &Segment, epsilon: f64, threshold: f64) -> Option<Segment> {
    let (into, out_of) = orient_at_joint(first, second, epsilon)?;
    let turn = angle_between(&into.direction(), &out_of.direction())?;
    if turn >= threshold {
        return None;
    }
    Some(Segment {
        a: into.a,
        b: out_of.b,
        id: first.id.clone(),
        thickness: first.thickness,
    })
}

/// Reorients the pair so that `first.b` is the shared point and `second.a` starts there.
fn orient_at_joint(first: &Segment, second: &Segment, epsilon: f64) -> Option<(Segment, Segment)> {
    if points_equal(&first.b, &second.a, epsilon) {
        Some((first.clone(), second.clone()))
    } else if points_equal(&first.b, &second.b, epsilon) {
        Some((first.clone(), second.reversed()))
    } else if points_equal(&first.a, &second.a, epsilon) {
        Some((first.reversed(), second.clone()))
    } else if points_equal(&first.a, &second.b, epsilon) {
        Some((first.reversed(), second.reversed()))
    } else {
        None
    }
}
