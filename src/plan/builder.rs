use crate::error::{PlanError, Result};
use crate::math::{points_equal, Point2, STITCH_TOLERANCE};

use super::room::{RoomDefinition, WallRef};
use super::wall::{Wall, WallDirection};

/// Transient state of a room being drawn interactively.
///
/// Walls are appended one at a time; the direction of each is inferred from
/// which endpoint touches the current tail node. The builder is consumed by
/// [`RoomBuilder::commit`] or [`RoomBuilder::cancel`].
#[derive(Debug, Clone)]
pub struct RoomBuilder {
    node_order: Vec<Point2>,
    wall_sequence: Vec<WallRef>,
    is_closed: bool,
    tolerance: f64,
    // `node_order` length before each wall was added, for undo.
    marks: Vec<usize>,
}

impl Default for RoomBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomBuilder {
    /// Creates an empty builder using the stitching tolerance.
    #[must_use]
    pub fn new() -> Self {
        Self {
            node_order: Vec::new(),
            wall_sequence: Vec::new(),
            is_closed: false,
            tolerance: STITCH_TOLERANCE,
            marks: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Distinct boundary nodes visited so far, in order.
    #[must_use]
    pub fn node_order(&self) -> &[Point2] {
        &self.node_order
    }

    #[must_use]
    pub fn wall_sequence(&self) -> &[WallRef] {
        &self.wall_sequence
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.is_closed
    }

    /// Appends a wall to the traversal.
    ///
    /// A wall touching neither end of the current tail keeps its natural
    /// direction; the gap becomes a pseudo segment when the room is computed.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::RoomClosed` once the loop has closed, or
    /// `PlanError::DuplicateWall` if the wall is already in the sequence.
    pub fn add_wall(&mut self, wall: &Wall) -> Result<WallDirection> {
        if self.is_closed {
            return Err(PlanError::RoomClosed.into());
        }
        if self.wall_sequence.iter().any(|w| w.wall_id == wall.id) {
            return Err(PlanError::DuplicateWall(wall.id.clone()).into());
        }

        self.marks.push(self.node_order.len());
        let direction = match self.node_order.last() {
            None => {
                self.node_order.push(wall.start);
                WallDirection::Forward
            }
            Some(tail) => {
                let d_start = nalgebra::distance(tail, &wall.start);
                let d_end = nalgebra::distance(tail, &wall.end);
                let direction = if d_end < d_start && d_end < self.tolerance {
                    WallDirection::Reverse
                } else {
                    WallDirection::Forward
                };
                let (start, _) = wall.directed(direction);
                if !points_equal(tail, &start, self.tolerance) {
                    self.node_order.push(start);
                }
                direction
            }
        };

        let (_, end) = wall.directed(direction);
        self.wall_sequence.push(WallRef::new(wall.id.clone(), direction));

        if self.wall_sequence.len() >= 2 && points_equal(&end, &self.node_order[0], self.tolerance)
        {
            self.is_closed = true;
        } else {
            self.node_order.push(end);
        }
        Ok(direction)
    }

    /// Removes the most recently added wall and reopens the loop.
    pub fn undo_last(&mut self) -> Option<WallRef> {
        let removed = self.wall_sequence.pop()?;
        let mark = self.marks.pop().unwrap_or(0);
        self.node_order.truncate(mark);
        self.is_closed = false;
        Some(removed)
    }

    /// Finishes the room, producing a persisted definition.
    ///
    /// Open rooms are accepted; their gaps are bridged by pseudo segments
    /// when computed.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::EmptyRoom` if no wall was added.
    pub fn commit(
        self,
        id: impl Into<String>,
        name: impl Into<String>,
        color: impl Into<String>,
        flooring: impl Into<String>,
    ) -> Result<RoomDefinition> {
        if self.wall_sequence.is_empty() {
            return Err(PlanError::EmptyRoom.into());
        }
        Ok(RoomDefinition {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            flooring: flooring.into(),
            walls: self.wall_sequence,
        })
    }

    /// Discards the in-progress room.
    pub fn cancel(self) {}
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point2 {
        Point2::new(x, y)
    }

    fn square_walls() -> Vec<Wall> {
        vec![
            Wall::new("s", p(0.0, 0.0), p(10.0, 0.0), 0.2),
            // Drawn the other way round.
            Wall::new("e", p(10.0, 10.0), p(10.0, 0.0), 0.2),
            Wall::new("n", p(10.0, 10.0), p(0.0, 10.0), 0.2),
            Wall::new("w", p(0.0, 10.0), p(0.0, 0.0), 0.2),
        ]
    }

    #[test]
    fn closes_square_and_infers_directions() {
        let walls = square_walls();
        let mut b = RoomBuilder::new();
        let dirs: Vec<WallDirection> = walls.iter().map(|w| b.add_wall(w).unwrap()).collect();
        assert_eq!(
            dirs,
            vec![
                WallDirection::Forward,
                WallDirection::Reverse,
                WallDirection::Forward,
                WallDirection::Forward,
            ]
        );
        assert!(b.is_closed());
        assert_eq!(b.node_order().len(), 4);
        let room = b.commit("r", "Room", "#fff", "oak").unwrap();
        assert_eq!(room.walls.len(), 4);
        assert_eq!(room.walls[1], WallRef::reverse("e"));
    }

    #[test]
    fn rejects_after_close_and_duplicates() {
        let walls = square_walls();
        let mut b = RoomBuilder::new();
        b.add_wall(&walls[0]).unwrap();
        assert!(b.add_wall(&walls[0]).is_err());
        for w in &walls[1..] {
            b.add_wall(w).unwrap();
        }
        let extra = Wall::new("x", p(0.0, 0.0), p(-5.0, 0.0), 0.2);
        assert!(b.add_wall(&extra).is_err());
    }

    #[test]
    fn undo_reopens_loop() {
        let walls = square_walls();
        let mut b = RoomBuilder::new();
        for w in &walls {
            b.add_wall(w).unwrap();
        }
        assert_eq!(b.undo_last().unwrap().wall_id, "w");
        assert!(!b.is_closed());
        assert_eq!(b.node_order().len(), 4);
        b.add_wall(&walls[3]).unwrap();
        assert!(b.is_closed());
    }

    #[test]
    fn disconnected_wall_records_gap_node() {
        let mut b = RoomBuilder::new();
        b.add_wall(&Wall::new("a", p(0.0, 0.0), p(10.0, 0.0), 0.2)).unwrap();
        b.add_wall(&Wall::new("b", p(12.0, 0.0), p(12.0, 10.0), 0.2)).unwrap();
        assert_eq!(b.node_order(), &[p(0.0, 0.0), p(10.0, 0.0), p(12.0, 0.0), p(12.0, 10.0)]);
    }

    #[test]
    fn empty_commit_fails() {
        assert!(RoomBuilder::new().commit("r", "", "", "").is_err());
    }
}
