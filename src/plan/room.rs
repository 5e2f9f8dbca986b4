use serde::{Deserialize, Serialize};

use crate::math::polygon_2d::{point_in_polygon, polygon_area, unflatten_points};
use crate::math::Point2;

use super::wall::WallDirection;

/// One entry of a room's closed wall traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallRef {
    pub wall_id: String,
    pub direction: WallDirection,
}

impl WallRef {
    #[must_use]
    pub fn new(wall_id: impl Into<String>, direction: WallDirection) -> Self {
        Self {
            wall_id: wall_id.into(),
            direction,
        }
    }

    #[must_use]
    pub fn forward(wall_id: impl Into<String>) -> Self {
        Self::new(wall_id, WallDirection::Forward)
    }

    #[must_use]
    pub fn reverse(wall_id: impl Into<String>) -> Self {
        Self::new(wall_id, WallDirection::Reverse)
    }
}

/// A persisted room: metadata plus an ordered, closed wall traversal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDefinition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub flooring: String,
    pub walls: Vec<WallRef>,
}

impl RoomDefinition {
    #[must_use]
    pub fn new(id: impl Into<String>, walls: Vec<WallRef>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            color: String::new(),
            flooring: String::new(),
            walls,
        }
    }

    /// Returns `true` if the traversal mentions `wall_id`.
    #[must_use]
    pub fn references(&self, wall_id: &str) -> bool {
        self.walls.iter().any(|w| w.wall_id == wall_id)
    }
}

/// A piece of a computed room boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BoundarySegment {
    /// Derived from a wall, in traversal direction.
    #[serde(rename_all = "camelCase")]
    Wall {
        wall_id: String,
        #[serde(serialize_with = "super::xy::serialize")]
        start: Point2,
        #[serde(serialize_with = "super::xy::serialize")]
        end: Point2,
    },
    /// Synthetic edge bridging a gap between non-meeting walls.
    Pseudo {
        #[serde(serialize_with = "super::xy::serialize")]
        start: Point2,
        #[serde(serialize_with = "super::xy::serialize")]
        end: Point2,
    },
}

impl BoundarySegment {
    #[must_use]
    pub fn start(&self) -> Point2 {
        match self {
            Self::Wall { start, .. } | Self::Pseudo { start, .. } => *start,
        }
    }

    #[must_use]
    pub fn end(&self) -> Point2 {
        match self {
            Self::Wall { end, .. } | Self::Pseudo { end, .. } => *end,
        }
    }

    #[must_use]
    pub fn is_pseudo(&self) -> bool {
        matches!(self, Self::Pseudo { .. })
    }
}

/// A room recomputed from its definition and the current walls.
///
/// Never persisted. `polygon_points` is the flat `[x0, y0, x1, y1, ...]`
/// list consumed by rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedRoom {
    pub id: String,
    pub name: String,
    pub color: String,
    pub flooring: String,
    pub segments: Vec<BoundarySegment>,
    pub polygon_points: Vec<f64>,
    #[serde(serialize_with = "super::xy::serialize_option")]
    pub centroid: Option<Point2>,
}

impl ComputedRoom {
    /// Boundary vertices decoded from `polygon_points`.
    #[must_use]
    pub fn vertices(&self) -> Vec<Point2> {
        unflatten_points(&self.polygon_points)
    }

    /// At least three vertices and a non-degenerate area.
    ///
    /// Invalid rooms are excluded from point-in-polygon and area queries.
    #[must_use]
    pub fn is_valid_polygon(&self) -> bool {
        self.polygon_points.len() >= 6 && self.centroid.is_some()
    }

    /// Unsigned area, or `0.0` for an invalid polygon.
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.is_valid_polygon() {
            polygon_area(&self.vertices())
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        self.is_valid_polygon() && point_in_polygon(point, &self.vertices())
    }

    #[must_use]
    pub fn pseudo_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_pseudo()).count()
    }

    /// `true` when every boundary piece comes from a wall.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        !self.segments.is_empty() && self.pseudo_segment_count() == 0
    }
}
