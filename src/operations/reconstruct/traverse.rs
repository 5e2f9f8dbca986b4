use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::math::polygon_2d::{dedup_consecutive, flatten_points, polygon_centroid};
use crate::math::{points_equal, Point2, STITCH_TOLERANCE};
use crate::plan::{BoundarySegment, ComputedRoom, PlanSnapshot, RoomDefinition, Wall};

/// Tolerance for stitching consecutive walls of a room definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraversalParams {
    /// Endpoints closer than this are treated as meeting.
    pub point_tolerance: f64,
}

impl Default for TraversalParams {
    fn default() -> Self {
        Self {
            point_tolerance: STITCH_TOLERANCE,
        }
    }
}

/// Recomputes a room's boundary from its ordered wall references.
///
/// References to walls missing from `walls` are skipped. Gaps between
/// consecutive walls, and between the last and first wall, are bridged with
/// pseudo segments so the boundary is always closed.
#[must_use]
pub fn compute_room(
    def: &RoomDefinition,
    walls: &HashMap<&str, &Wall>,
    params: &TraversalParams,
) -> ComputedRoom {
    let tol = params.point_tolerance;
    let mut segments: Vec<BoundarySegment> = Vec::with_capacity(def.walls.len() + 1);
    let mut first_start: Option<Point2> = None;
    let mut prev_end: Option<Point2> = None;

    for r in &def.walls {
        let Some(wall) = walls.get(r.wall_id.as_str()) else {
            trace!(room = %def.id, wall = %r.wall_id, "skipping unresolved wall reference");
            continue;
        };
        let (start, end) = wall.directed(r.direction);
        if let Some(prev) = prev_end {
            if !points_equal(&prev, &start, tol) {
                segments.push(BoundarySegment::Pseudo { start: prev, end: start });
            }
        }
        first_start.get_or_insert(start);
        segments.push(BoundarySegment::Wall {
            wall_id: r.wall_id.clone(),
            start,
            end,
        });
        prev_end = Some(end);
    }

    if let (Some(first), Some(last)) = (first_start, prev_end) {
        if !points_equal(&last, &first, tol) {
            segments.push(BoundarySegment::Pseudo { start: last, end: first });
        }
    }

    let starts: Vec<Point2> = segments.iter().map(BoundarySegment::start).collect();
    let vertices = dedup_consecutive(&starts, tol);
    let centroid = if vertices.len() >= 3 {
        polygon_centroid(&vertices)
    } else {
        None
    };

    ComputedRoom {
        id: def.id.clone(),
        name: def.name.clone(),
        color: def.color.clone(),
        flooring: def.flooring.clone(),
        segments,
        polygon_points: flatten_points(&vertices),
        centroid,
    }
}

/// Computes every room of the plan in definition order.
#[must_use]
pub fn compute_rooms(plan: &PlanSnapshot, params: &TraversalParams) -> Vec<ComputedRoom> {
    let walls = plan.wall_index();
    plan.rooms
        .iter()
        .map(|def| compute_room(def, &walls, params))
        .collect()
}
