//! Door and window attachment to walls.

use serde::{Deserialize, Serialize};

use crate::math::angle_2d::normalize_degrees;
use crate::math::distance_2d::point_to_segment_dist;
use crate::math::{Point2, Vector2, ATTACH_TOLERANCE};
use crate::plan::{OpeningKind, PlacedEntity, PlacedItem, Wall};

/// Sampling settings for the attachment test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachParams {
    /// Maximum distance from a sample to the wall centerline.
    pub tolerance: f64,
    /// Number of intervals the attachment line is split into.
    pub steps: usize,
}

impl Default for AttachParams {
    fn default() -> Self {
        Self {
            tolerance: ATTACH_TOLERANCE,
            steps: 10,
        }
    }
}

/// World-space line along which an opening meets its wall.
///
/// Doors use their hinge edge: the local left edge, or the right edge when
/// inverted, carried through the item's rotation. Windows use a line through
/// their center spanning the scaled width, vertical when the rotation is in
/// `[45°, 135°) ∪ [225°, 315°)` and horizontal otherwise.
///
/// Returns `None` for items that are not doors or windows.
#[must_use]
pub fn attachment_line(item: &PlacedItem) -> Option<(Point2, Point2)> {
    let fp = item.footprint();
    let (w, h) = (fp.world_width(), fp.world_height());
    match item.subtype? {
        OpeningKind::Door => {
            let x = if item.inverted { w } else { 0.0 };
            Some((
                item.to_world(Vector2::new(x, 0.0)),
                item.to_world(Vector2::new(x, h)),
            ))
        }
        OpeningKind::Window => {
            let c = item.center();
            let half = w * 0.5;
            let r = normalize_degrees(item.rotation);
            let vertical = (45.0..135.0).contains(&r) || (225.0..315.0).contains(&r);
            if vertical {
                Some((Point2::new(c.x, c.y - half), Point2::new(c.x, c.y + half)))
            } else {
                Some((Point2::new(c.x - half, c.y), Point2::new(c.x + half, c.y)))
            }
        }
    }
}

/// `true` if any of `steps + 1` evenly spaced samples along `line` lies
/// within tolerance of the wall centerline.
#[must_use]
pub fn line_touches_wall(line: (Point2, Point2), wall: &Wall, params: &AttachParams) -> bool {
    let steps = params.steps.max(1);
    let (a, b) = line;
    (0..=steps).any(|i| {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / steps as f64;
        let p = a + (b - a) * t;
        point_to_segment_dist(&p, &wall.start, &wall.end) <= params.tolerance
    })
}

/// The first wall, in entity order, that the opening's attachment line touches.
#[must_use]
pub fn find_attached_wall_id<'a>(
    item: &PlacedItem,
    entities: &[PlacedEntity<'a>],
    params: &AttachParams,
) -> Option<&'a str> {
    let line = attachment_line(item)?;
    entities
        .iter()
        .filter_map(PlacedEntity::as_wall)
        .find(|wall| line_touches_wall(line, wall, params))
        .map(|wall| wall.id.as_str())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wall() -> Wall {
        Wall::new("w1", Point2::new(0.0, 100.0), Point2::new(400.0, 100.0), 10.0)
    }

    #[test]
    fn door_hinge_is_left_edge() {
        let door = PlacedItem::new("d", 50.0, 95.0, 40.0, 10.0).with_subtype(OpeningKind::Door);
        let (a, b) = attachment_line(&door).unwrap();
        assert_abs_diff_eq!(a, Point2::new(50.0, 95.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b, Point2::new(50.0, 105.0), epsilon = 1e-9);
    }

    #[test]
    fn inverted_door_uses_right_edge() {
        let door = PlacedItem::new("d", 50.0, 95.0, 40.0, 10.0)
            .with_subtype(OpeningKind::Door)
            .inverted(true);
        let (a, _) = attachment_line(&door).unwrap();
        assert_abs_diff_eq!(a, Point2::new(90.0, 95.0), epsilon = 1e-9);
    }

    #[test]
    fn rotated_door_hinge_follows_rotation() {
        let door = PlacedItem::new("d", 0.0, 0.0, 40.0, 10.0)
            .with_subtype(OpeningKind::Door)
            .with_rotation(90.0);
        let (a, b) = attachment_line(&door).unwrap();
        assert_abs_diff_eq!(a, Point2::new(0.0, 0.0), epsilon = 1e-9);
        assert_abs_diff_eq!(b, Point2::new(-10.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn window_axis_depends_on_rotation() {
        let flat = PlacedItem::new("win", 0.0, 0.0, 40.0, 10.0).with_subtype(OpeningKind::Window);
        let (a, b) = attachment_line(&flat).unwrap();
        assert_abs_diff_eq!(a.y, b.y, epsilon = 1e-9);
        assert_abs_diff_eq!(b.x - a.x, 40.0, epsilon = 1e-9);

        let upright = flat.clone().with_rotation(-90.0);
        let (a, b) = attachment_line(&upright).unwrap();
        assert_abs_diff_eq!(a.x, b.x, epsilon = 1e-9);
        assert_abs_diff_eq!(b.y - a.y, 40.0, epsilon = 1e-9);
    }

    #[test]
    fn furniture_has_no_attachment_line() {
        assert!(attachment_line(&PlacedItem::new("bed", 0.0, 0.0, 10.0, 10.0)).is_none());
    }

    #[test]
    fn door_on_wall_attaches_and_detaches_when_moved() {
        let w = wall();
        let entities = [PlacedEntity::Wall(&w)];
        let params = AttachParams::default();
        let mut door =
            PlacedItem::new("d", 50.0, 95.0, 40.0, 10.0).with_subtype(OpeningKind::Door);
        assert_eq!(find_attached_wall_id(&door, &entities, &params), Some("w1"));

        door.y += 100.0;
        assert_eq!(find_attached_wall_id(&door, &entities, &params), None);
    }

    #[test]
    fn first_touching_wall_wins() {
        let a = wall();
        let b = Wall::new("w2", Point2::new(0.0, 102.0), Point2::new(400.0, 102.0), 10.0);
        let entities = [PlacedEntity::Wall(&b), PlacedEntity::Wall(&a)];
        let window =
            PlacedItem::new("win", 100.0, 95.0, 40.0, 10.0).with_subtype(OpeningKind::Window);
        assert_eq!(
            find_attached_wall_id(&window, &entities, &AttachParams::default()),
            Some("w2")
        );
    }
}
