use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::geometry::Segment;
use crate::math::{is_finite_point, Point2};

/// Maximum number of rooms a wall can bound.
pub const MAX_WALL_ROOMS: usize = 2;

/// Traversal direction of a wall inside a room boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WallDirection {
    /// The wall's own `start → end`.
    Forward,
    /// `end → start`.
    Reverse,
}

/// A wall in the plan.
///
/// `room_ids` is derived: the sorted set of rooms (at most
/// [`MAX_WALL_ROOMS`]) whose definitions reference this wall. It is
/// recomputed by room assignment and never edited by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: String,
    #[serde(with = "super::xy")]
    pub start: Point2,
    #[serde(with = "super::xy")]
    pub end: Point2,
    pub thickness: f64,
    #[serde(default)]
    pub room_ids: Vec<String>,
}

impl Wall {
    /// Creates a wall with no room membership.
    #[must_use]
    pub fn new(id: impl Into<String>, start: Point2, end: Point2, thickness: f64) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            thickness,
            room_ids: Vec::new(),
        }
    }

    /// Returns `(start, end)` as traversed in `direction`.
    #[must_use]
    pub fn directed(&self, direction: WallDirection) -> (Point2, Point2) {
        match direction {
            WallDirection::Forward => (self.start, self.end),
            WallDirection::Reverse => (self.end, self.start),
        }
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        nalgebra::distance(&self.start, &self.end)
    }

    #[must_use]
    pub fn half_thickness(&self) -> f64 {
        self.thickness * 0.5
    }

    /// Dominant-axis classification: `true` if the X span is at least the Y span.
    #[must_use]
    pub fn is_horizontal(&self) -> bool {
        (self.end.x - self.start.x).abs() >= (self.end.y - self.start.y).abs()
    }

    /// The wall centerline as a cleaning/detection segment.
    #[must_use]
    pub fn segment(&self) -> Segment {
        Segment::new(self.start, self.end)
            .with_id(self.id.clone())
            .with_thickness(self.thickness)
    }

    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` if an endpoint or the thickness is not finite.
    pub fn check_finite(&self) -> Result<()> {
        if is_finite_point(&self.start)
            && is_finite_point(&self.end)
            && self.thickness.is_finite()
        {
            Ok(())
        } else {
            Err(GeometryError::NonFinite {
                context: format!("wall {}", self.id),
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directed_endpoints() {
        let w = Wall::new("w", Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 0.2);
        assert_eq!(w.directed(WallDirection::Forward).0, Point2::new(0.0, 0.0));
        assert_eq!(w.directed(WallDirection::Reverse).0, Point2::new(10.0, 0.0));
    }

    #[test]
    fn dominant_axis() {
        let h = Wall::new("h", Point2::new(0.0, 0.0), Point2::new(10.0, 2.0), 0.2);
        let v = Wall::new("v", Point2::new(0.0, 0.0), Point2::new(2.0, -10.0), 0.2);
        assert!(h.is_horizontal());
        assert!(!v.is_horizontal());
    }
}
