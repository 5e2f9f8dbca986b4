use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geometry::Segment;
use crate::math::Point2;
use crate::operations::reconstruct::DetectedRoom;
use crate::plan::{ComputedRoom, PlanSnapshot, MAX_WALL_ROOMS};

/// A room boundary to validate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomOutline {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub points: Vec<Point2>,
}

impl RoomOutline {
    /// Name used in messages: the display name, or the id when unnamed.
    #[must_use]
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

/// A wall made of one or more length-bearing segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallRun {
    pub id: String,
    pub segments: Vec<Segment>,
}

/// Clear dimensions of a door or window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningSize {
    pub id: String,
    pub width: f64,
    pub height: f64,
}

/// Everything the validator looks at, in validation units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationInput {
    pub rooms: Vec<RoomOutline>,
    pub walls: Vec<WallRun>,
    pub openings: Vec<OpeningSize>,
    /// Walls referenced by more rooms than a wall can bound.
    pub over_shared_walls: Vec<String>,
}

impl ValidationInput {
    /// Builds input from the import path: detected rooms and the cleaned segments.
    ///
    /// Each segment is its own wall run, named by its id or its position.
    #[must_use]
    pub fn from_detected(rooms: &[DetectedRoom], segments: &[Segment]) -> Self {
        Self {
            rooms: rooms
                .iter()
                .enumerate()
                .map(|(i, r)| RoomOutline {
                    id: format!("room-{i}"),
                    name: String::new(),
                    points: r.polygon.clone(),
                })
                .collect(),
            walls: segments
                .iter()
                .enumerate()
                .map(|(i, s)| WallRun {
                    id: s.id.clone().unwrap_or_else(|| format!("segment-{i}")),
                    segments: vec![s.clone()],
                })
                .collect(),
            openings: Vec::new(),
            over_shared_walls: Vec::new(),
        }
    }

    /// Builds input from an edited plan and its computed rooms.
    ///
    /// Coordinates and opening sizes are multiplied by `unit_scale` so plan
    /// units can be checked against thresholds expressed in real-world units.
    #[must_use]
    pub fn from_plan(plan: &PlanSnapshot, rooms: &[ComputedRoom], unit_scale: f64) -> Self {
        let scale_point = |p: Point2| Point2::new(p.x * unit_scale, p.y * unit_scale);

        let outlines = rooms
            .iter()
            .map(|r| RoomOutline {
                id: r.id.clone(),
                name: r.name.clone(),
                points: r.vertices().into_iter().map(scale_point).collect(),
            })
            .collect();

        let walls = plan
            .walls
            .iter()
            .map(|w| WallRun {
                id: w.id.clone(),
                segments: vec![Segment::new(scale_point(w.start), scale_point(w.end))
                    .with_id(w.id.clone())
                    .with_thickness(w.thickness * unit_scale)],
            })
            .collect();

        let openings = plan
            .objects
            .iter()
            .filter(|o| o.is_opening())
            .map(|o| {
                let fp = o.footprint();
                OpeningSize {
                    id: o.id.clone(),
                    width: fp.world_width() * unit_scale,
                    height: fp.world_height() * unit_scale,
                }
            })
            .collect();

        let mut references: HashMap<&str, Vec<&str>> = HashMap::new();
        for def in &plan.rooms {
            for r in &def.walls {
                let rooms = references.entry(r.wall_id.as_str()).or_default();
                if !rooms.contains(&def.id.as_str()) {
                    rooms.push(def.id.as_str());
                }
            }
        }
        let over_shared_walls = plan
            .walls
            .iter()
            .filter(|w| references.get(w.id.as_str()).is_some_and(|r| r.len() > MAX_WALL_ROOMS))
            .map(|w| w.id.clone())
            .collect();

        Self {
            rooms: outlines,
            walls,
            openings,
            over_shared_walls,
        }
    }
}
