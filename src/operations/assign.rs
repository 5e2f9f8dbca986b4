//! Recomputation of every derived plan field.
//!
//! Wall membership, item rooms and opening attachments are rebuilt from
//! scratch on each call; nothing is patched incrementally.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use super::attach::{find_attached_wall_id, AttachParams};
use super::reconstruct::{compute_rooms, TraversalParams};
use crate::plan::{ComputedRoom, PlacedEntity, PlanSnapshot, MAX_WALL_ROOMS};

/// A plan with its derived fields recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedPlan {
    pub plan: PlanSnapshot,
    pub rooms: Vec<ComputedRoom>,
    /// Walls referenced by more than [`MAX_WALL_ROOMS`] rooms. Only the
    /// first rooms in plan order are kept in their `room_ids`.
    pub over_shared_walls: Vec<String>,
}

/// Recomputes rooms, wall membership, item rooms and opening attachments.
#[derive(Debug, Clone)]
pub struct AssignRooms<'a> {
    plan: &'a PlanSnapshot,
    traversal: TraversalParams,
    attach: AttachParams,
}

impl<'a> AssignRooms<'a> {
    #[must_use]
    pub fn new(plan: &'a PlanSnapshot) -> Self {
        Self {
            plan,
            traversal: TraversalParams::default(),
            attach: AttachParams::default(),
        }
    }

    #[must_use]
    pub fn with_traversal_params(mut self, params: TraversalParams) -> Self {
        self.traversal = params;
        self
    }

    #[must_use]
    pub fn with_attach_params(mut self, params: AttachParams) -> Self {
        self.attach = params;
        self
    }

    #[must_use]
    pub fn execute(&self) -> AssignedPlan {
        let plan = self.plan;
        let rooms = compute_rooms(plan, &self.traversal);
        let (membership, over_shared_walls) = wall_membership(plan);

        let mut out = plan.clone();
        for wall in &mut out.walls {
            wall.room_ids = membership.get(wall.id.as_str()).cloned().unwrap_or_default();
        }

        let walls: Vec<PlacedEntity<'_>> = plan.walls.iter().map(PlacedEntity::Wall).collect();
        let mut attached_count = 0;
        for item in &mut out.objects {
            let attached = if item.is_opening() {
                find_attached_wall_id(item, &walls, &self.attach).map(str::to_owned)
            } else {
                None
            };

            let center = item.center();
            let mut room_id = rooms
                .iter()
                .find(|r| r.contains(&center))
                .map(|r| r.id.clone());

            if let Some(wall_id) = &attached {
                attached_count += 1;
                if let Some([only]) = membership.get(wall_id.as_str()).map(Vec::as_slice) {
                    room_id = Some(only.clone());
                }
            }

            item.room_id = room_id;
            item.attached_to_wall_id = attached;
        }

        debug!(
            rooms = rooms.len(),
            walls = out.walls.len(),
            items = out.objects.len(),
            attached = attached_count,
            "recomputed plan assignments"
        );

        AssignedPlan {
            plan: out,
            rooms,
            over_shared_walls,
        }
    }
}

/// Recomputes rooms and every derived field with default parameters.
#[must_use]
pub fn assign_rooms(plan: &PlanSnapshot) -> AssignedPlan {
    AssignRooms::new(plan).execute()
}

/// Sorted room ids per wall, capped at [`MAX_WALL_ROOMS`], plus the walls
/// whose later references were dropped.
fn wall_membership(plan: &PlanSnapshot) -> (HashMap<&str, Vec<String>>, Vec<String>) {
    let mut membership: HashMap<&str, Vec<String>> = HashMap::new();
    let mut dropped: HashMap<&str, Vec<&str>> = HashMap::new();

    for def in &plan.rooms {
        for r in &def.walls {
            let rooms = membership.entry(r.wall_id.as_str()).or_default();
            if rooms.contains(&def.id) {
                continue;
            }
            if rooms.len() < MAX_WALL_ROOMS {
                rooms.push(def.id.clone());
            } else {
                dropped.entry(r.wall_id.as_str()).or_default().push(def.id.as_str());
            }
        }
    }
    for rooms in membership.values_mut() {
        rooms.sort();
    }

    let mut over_shared = Vec::new();
    for wall in &plan.walls {
        if let Some(ignored) = dropped.get(wall.id.as_str()) {
            warn!(
                wall = %wall.id,
                ignored = ?ignored,
                "wall referenced by more than {MAX_WALL_ROOMS} rooms"
            );
            over_shared.push(wall.id.clone());
        }
    }
    (membership, over_shared)
}
