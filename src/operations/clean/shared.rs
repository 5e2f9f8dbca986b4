use serde::Serialize;

use crate::geometry::Segment;
use crate::math::angle_2d::axis_angle_between;
use crate::math::intersect_2d::collinear_overlap;
use crate::math::points_equal;

/// Two segments that describe the same stretch of wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SharedWall {
    /// Index of the first segment in the input list.
    pub first: usize,
    /// Index of the second segment in the input list.
    pub second: usize,
    pub first_id: Option<String>,
    pub second_id: Option<String>,
    /// Length of the overlap along the common axis.
    pub overlap: f64,
}

/// Reports pairs of collinear segments that share an endpoint and overlap.
///
/// Direction is ignored when comparing angles, so a segment doubled back
/// over its neighbour is reported. Pairs overlapping by no more than
/// `min_overlap` are skipped.
#[must_use]
pub fn detect_shared_walls(
    segments: &[Segment],
    epsilon: f64,
    angle_threshold_deg: f64,
    min_overlap: f64,
) -> Vec<SharedWall> {
    let threshold = angle_threshold_deg.to_radians();
    let mut shared = Vec::new();

    for (i, si) in segments.iter().enumerate() {
        for (j, sj) in segments.iter().enumerate().skip(i + 1) {
            if !shares_endpoint(si, sj, epsilon) {
                continue;
            }
            let Some(angle) = axis_angle_between(&si.direction(), &sj.direction()) else {
                continue;
            };
            if angle >= threshold {
                continue;
            }
            let overlap = collinear_overlap(&si.a, &si.b, &sj.a, &sj.b);
            if overlap > min_overlap {
                shared.push(SharedWall {
                    first: i,
                    second: j,
                    first_id: si.id.clone(),
                    second_id: sj.id.clone(),
                    overlap,
                });
            }
        }
    }
    shared
}

fn shares_endpoint(s: &Segment, t: &Segment, epsilon: f64) -> bool {
    [(&s.a, &t.a), (&s.a, &t.b), (&s.b, &t.a), (&s.b, &t.b)]
        .iter()
        .any(|(p, q)| points_equal(p, q, epsilon))
}
