//! The plan entity collection and its record types.
//!
//! [`PlanSnapshot`] is the `{walls, rooms, objects}` document exchanged with
//! persistence. Derived fields (`Wall::room_ids`, `PlacedItem::room_id`,
//! `PlacedItem::attached_to_wall_id`) are recomputed from scratch by
//! [`crate::operations::assign_rooms`] after every edit.

pub mod builder;
pub mod entity;
pub mod item;
pub mod room;
pub mod wall;

pub use builder::RoomBuilder;
pub use entity::PlacedEntity;
pub use item::{ItemFootprint, OpeningKind, PlacedItem};
pub use room::{BoundarySegment, ComputedRoom, RoomDefinition, WallRef};
pub use wall::{Wall, WallDirection, MAX_WALL_ROOMS};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PlanError, Result};

/// A single-level plan as supplied by persistence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    #[serde(default)]
    pub walls: Vec<Wall>,
    #[serde(default)]
    pub rooms: Vec<RoomDefinition>,
    #[serde(default)]
    pub objects: Vec<PlacedItem>,
}

impl PlanSnapshot {
    /// Creates a new, empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity collection in list order: walls, then objects.
    #[must_use]
    pub fn entities(&self) -> Vec<PlacedEntity<'_>> {
        self.walls
            .iter()
            .map(PlacedEntity::Wall)
            .chain(self.objects.iter().map(PlacedEntity::Item))
            .collect()
    }

    /// Walls indexed by id.
    #[must_use]
    pub fn wall_index(&self) -> HashMap<&str, &Wall> {
        self.walls.iter().map(|w| (w.id.as_str(), w)).collect()
    }

    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` if no wall has this id.
    pub fn wall(&self, id: &str) -> Result<&Wall> {
        self.walls
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| PlanError::EntityNotFound(format!("wall {id}")).into())
    }

    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` if no room has this id.
    pub fn room(&self, id: &str) -> Result<&RoomDefinition> {
        self.rooms
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| PlanError::EntityNotFound(format!("room {id}")).into())
    }

    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` if no object has this id.
    pub fn item(&self, id: &str) -> Result<&PlacedItem> {
        self.objects
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| PlanError::EntityNotFound(format!("item {id}")).into())
    }

    /// # Errors
    ///
    /// Returns `PlanError::EntityNotFound` if no object has this id.
    pub fn item_mut(&mut self, id: &str) -> Result<&mut PlacedItem> {
        self.objects
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| PlanError::EntityNotFound(format!("item {id}")).into())
    }

    /// Rejects snapshots carrying NaN or infinite values.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` for the first offending wall or object.
    pub fn check_finite(&self) -> Result<()> {
        for wall in &self.walls {
            wall.check_finite()?;
        }
        for item in &self.objects {
            item.check_finite()?;
        }
        Ok(())
    }
}

/// Serializes a point as `{ "x": .., "y": .. }`.
pub(crate) mod xy {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::math::Point2;

    #[derive(Serialize, Deserialize)]
    struct Xy {
        x: f64,
        y: f64,
    }

    pub fn serialize<S: Serializer>(p: &Point2, serializer: S) -> Result<S::Ok, S::Error> {
        Xy { x: p.x, y: p.y }.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Point2, D::Error> {
        let Xy { x, y } = Xy::deserialize(deserializer)?;
        Ok(Point2::new(x, y))
    }

    #[allow(clippy::ref_option)]
    pub fn serialize_option<S: Serializer>(
        p: &Option<Point2>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        p.map(|p| Xy { x: p.x, y: p.y }).serialize(serializer)
    }
}
