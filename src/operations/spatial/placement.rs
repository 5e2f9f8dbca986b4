use serde::Serialize;

use crate::math::{Point2, Vector2, TOLERANCE};
use crate::plan::{PlacedEntity, PlacedItem, Wall};

/// Outcome of a placement validity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacementReport {
    pub is_valid: bool,
    /// Ids of items whose footprint overlaps the candidate.
    pub item_collisions: Vec<String>,
    /// Ids of walls whose body overlaps the candidate.
    pub wall_collisions: Vec<String>,
}

/// Rectangle body of a wall: its centerline widened by the thickness.
///
/// Returns `None` for a zero-length wall.
#[must_use]
pub fn wall_corners(wall: &Wall) -> Option<[Point2; 4]> {
    let d = wall.end - wall.start;
    let len = d.norm();
    if len < TOLERANCE {
        return None;
    }
    let n = Vector2::new(-d.y, d.x) / len * wall.half_thickness();
    Some([wall.start - n, wall.end - n, wall.end + n, wall.start + n])
}

fn project(corners: &[Point2; 4], axis: &Vector2) -> (f64, f64) {
    corners.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
        let dot = c.coords.dot(axis);
        (lo.min(dot), hi.max(dot))
    })
}

/// `true` if the interiors of two rectangles overlap.
///
/// Separating axis test over the edge normals of both rectangles. Touching
/// along an edge or at a corner is not an overlap.
#[must_use]
pub fn rects_overlap(a: &[Point2; 4], b: &[Point2; 4]) -> bool {
    for corners in [a, b] {
        // Opposite edges are parallel, two normals per rectangle suffice.
        for i in 0..2 {
            let e = corners[i + 1] - corners[i];
            if e.norm_squared() < TOLERANCE * TOLERANCE {
                continue;
            }
            let axis = Vector2::new(-e.y, e.x).normalize();
            let (min_a, max_a) = project(a, &axis);
            let (min_b, max_b) = project(b, &axis);
            if max_a <= min_b + TOLERANCE || max_b <= min_a + TOLERANCE {
                return false;
            }
        }
    }
    true
}

/// Checks whether `candidate` may be placed among `entities`.
///
/// No item may overlap another item. Doors and windows sit in walls and may
/// overlap them; other items may not. The candidate's own id is skipped.
#[must_use]
pub fn check_placement(candidate: &PlacedItem, entities: &[PlacedEntity<'_>]) -> PlacementReport {
    let body = candidate.corners();
    let mut report = PlacementReport::default();

    for entity in entities {
        if entity.id() == candidate.id {
            continue;
        }
        match entity {
            PlacedEntity::Item(other) => {
                if rects_overlap(&body, &other.corners()) {
                    report.item_collisions.push(other.id.clone());
                }
            }
            PlacedEntity::Wall(wall) => {
                if candidate.is_opening() {
                    continue;
                }
                if wall_corners(wall).is_some_and(|w| rects_overlap(&body, &w)) {
                    report.wall_collisions.push(wall.id.clone());
                }
            }
        }
    }

    report.is_valid = report.item_collisions.is_empty() && report.wall_collisions.is_empty();
    report
}
