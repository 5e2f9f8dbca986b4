use super::intersect_2d::segments_intersect;
use super::{points_equal, Point2, AREA_EPSILON, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Unsigned polygon area.
#[must_use]
pub fn polygon_area(points: &[Point2]) -> f64 {
    signed_area(points).abs()
}

/// Area-weighted centroid of a simple polygon.
///
/// Returns `None` when the absolute area is below [`AREA_EPSILON`]; such a
/// polygon is not a valid room for spatial queries.
#[must_use]
pub fn polygon_centroid(points: &[Point2]) -> Option<Point2> {
    let area = signed_area(points);
    if area.abs() < AREA_EPSILON {
        return None;
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        let cross = points[i].x * points[j].y - points[j].x * points[i].y;
        cx += (points[i].x + points[j].x) * cross;
        cy += (points[i].y + points[j].y) * cross;
    }
    let factor = 1.0 / (6.0 * area);
    Some(Point2::new(cx * factor, cy * factor))
}

/// Ray-casting parity test.
///
/// Points exactly on the boundary may fall either way.
#[must_use]
pub fn point_in_polygon(point: &Point2, points: &[Point2]) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (pi, pj) = (&points[i], &points[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let x_cross = (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Returns `true` if any two non-adjacent edges of the closed polygon cross.
#[must_use]
pub fn has_self_intersection(points: &[Point2]) -> bool {
    let n = points.len();
    if n < 4 {
        return false;
    }
    for i in 0..n {
        let a0 = &points[i];
        let a1 = &points[(i + 1) % n];
        for j in (i + 2)..n {
            // The last edge is adjacent to the first.
            if i == 0 && j == n - 1 {
                continue;
            }
            let b0 = &points[j];
            let b1 = &points[(j + 1) % n];
            if segments_intersect(a0, a1, b0, b1) {
                return true;
            }
        }
    }
    false
}

/// Drops consecutive near-equal points, including a trailing point equal to the first.
#[must_use]
pub fn dedup_consecutive(points: &[Point2], tolerance: f64) -> Vec<Point2> {
    let mut out: Vec<Point2> = Vec::with_capacity(points.len());
    for p in points {
        if out.last().is_some_and(|last| points_equal(last, p, tolerance)) {
            continue;
        }
        out.push(*p);
    }
    while out.len() > 1 && points_equal(&out[0], &out[out.len() - 1], tolerance) {
        out.pop();
    }
    out
}

/// Flattens points into `[x0, y0, x1, y1, ...]`.
#[must_use]
pub fn flatten_points(points: &[Point2]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Inverse of [`flatten_points`]; a trailing odd coordinate is ignored.
#[must_use]
pub fn unflatten_points(coords: &[f64]) -> Vec<Point2> {
    coords
        .chunks_exact(2)
        .map(|c| Point2::new(c[0], c[1]))
        .collect()
}

/// Absolute area of the triangle `a, b, c`.
#[must_use]
pub fn triangle_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)).abs() * 0.5
}

/// Returns the leftmost-bottommost vertex of a polygon (for tie-breaking in sort).
#[must_use]
pub fn leftmost_bottom(points: &[Point2]) -> Option<Point2> {
    let mut iter = points.iter();
    let mut best = *iter.next()?;
    for &pt in iter {
        if pt.x < best.x - TOLERANCE || ((pt.x - best.x).abs() < TOLERANCE && pt.y < best.y) {
            best = pt;
        }
    }
    Some(best)
}
