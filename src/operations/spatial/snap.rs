use serde::{Deserialize, Serialize};

use crate::math::distance_2d::{closest_point_on_segment, point_to_segment_dist};
use crate::math::Point2;
use crate::plan::{ItemFootprint, PlacedEntity, PlacedItem, Wall};

/// Snap radius settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SnapParams {
    /// Snap radius in screen units.
    pub snap_distance: f64,
    /// Current zoom factor; the world radius shrinks as the view zooms in.
    pub view_scale: f64,
}

impl Default for SnapParams {
    fn default() -> Self {
        Self {
            snap_distance: 8.0,
            view_scale: 1.0,
        }
    }
}

impl SnapParams {
    /// World-space snap tolerance.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        if self.view_scale.is_finite() && self.view_scale > 0.0 {
            self.snap_distance / self.view_scale
        } else {
            self.snap_distance
        }
    }
}

/// Adjusted drag position, resolved independently per axis.
///
/// `snap_line_x` / `snap_line_y` are the world coordinates of the guide
/// line that produced each snap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapResult {
    pub x: f64,
    pub y: f64,
    pub snapped_x: bool,
    pub snapped_y: bool,
    pub snap_line_x: Option<f64>,
    pub snap_line_y: Option<f64>,
}

impl SnapResult {
    fn unsnapped(cursor: Point2) -> Self {
        Self {
            x: cursor.x,
            y: cursor.y,
            snapped_x: false,
            snapped_y: false,
            snap_line_x: None,
            snap_line_y: None,
        }
    }

    fn resolve_x(&mut self, x: f64, line: f64) {
        self.x = x;
        self.snapped_x = true;
        self.snap_line_x = Some(line);
    }

    fn resolve_y(&mut self, y: f64, line: f64) {
        self.y = y;
        self.snapped_y = true;
        self.snap_line_y = Some(line);
    }

    fn is_complete(&self) -> bool {
        self.snapped_x && self.snapped_y
    }

    #[must_use]
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Axis-aligned extent of an item along one axis.
#[derive(Debug, Clone, Copy)]
struct Span {
    min: f64,
    max: f64,
}

impl Span {
    fn center(self) -> f64 {
        (self.min + self.max) * 0.5
    }
}

/// Finds the snapped position for an item being placed or dragged.
///
/// Entities are searched in the order given and the first candidate within
/// tolerance locks an axis; the search ends once both axes are locked.
#[derive(Debug, Clone, Default)]
pub struct SnapEngine {
    params: SnapParams,
}

impl SnapEngine {
    #[must_use]
    pub fn new(params: SnapParams) -> Self {
        Self { params }
    }

    #[must_use]
    pub fn params(&self) -> &SnapParams {
        &self.params
    }

    /// Snaps `cursor`, the proposed item origin, against `entities`.
    ///
    /// The entity whose id equals `exclude_id` (normally the dragged item
    /// itself) is skipped.
    #[must_use]
    pub fn snap(
        &self,
        cursor: Point2,
        footprint: &ItemFootprint,
        entities: &[PlacedEntity<'_>],
        exclude_id: Option<&str>,
    ) -> SnapResult {
        let mut result = SnapResult::unsnapped(cursor);
        let tol = self.params.tolerance();
        if !tol.is_finite() || tol <= 0.0 || !cursor.x.is_finite() || !cursor.y.is_finite() {
            return result;
        }

        for entity in entities {
            if result.is_complete() {
                break;
            }
            if exclude_id.is_some_and(|id| id == entity.id()) {
                continue;
            }
            match entity {
                PlacedEntity::Item(item) => snap_to_item(&mut result, cursor, footprint, item, tol),
                PlacedEntity::Wall(wall) => snap_to_wall(&mut result, cursor, footprint, wall, tol),
            }
        }
        result
    }
}

/// Edge-to-edge then center alignment for one axis.
///
/// `origin` is the dragged item's leading coordinate and `size` its extent.
/// Returns `(new_origin, guide_line)`.
fn align_spans(origin: f64, size: f64, target: Span, tol: f64) -> Option<(f64, f64)> {
    let candidates = [
        // leading ↔ target leading
        (origin - target.min, target.min, target.min),
        // leading ↔ target trailing
        (origin - target.max, target.max, target.max),
        // trailing ↔ target leading
        (origin + size - target.min, target.min - size, target.min),
        // trailing ↔ target trailing
        (origin + size - target.max, target.max - size, target.max),
        // center ↔ center
        (
            origin + size * 0.5 - target.center(),
            target.center() - size * 0.5,
            target.center(),
        ),
    ];
    candidates
        .into_iter()
        .find(|(gap, _, _)| gap.abs() < tol)
        .map(|(_, snapped, line)| (snapped, line))
}

fn snap_to_item(
    result: &mut SnapResult,
    cursor: Point2,
    footprint: &ItemFootprint,
    item: &PlacedItem,
    tol: f64,
) {
    let corners = item.corners();
    let (sx, sy) = corners.iter().fold(
        (
            Span { min: f64::INFINITY, max: f64::NEG_INFINITY },
            Span { min: f64::INFINITY, max: f64::NEG_INFINITY },
        ),
        |(sx, sy), c| {
            (
                Span { min: sx.min.min(c.x), max: sx.max.max(c.x) },
                Span { min: sy.min.min(c.y), max: sy.max.max(c.y) },
            )
        },
    );
    if !result.snapped_x {
        if let Some((x, line)) = align_spans(cursor.x, footprint.world_width(), sx, tol) {
            result.resolve_x(x, line);
        }
    }
    if !result.snapped_y {
        if let Some((y, line)) = align_spans(cursor.y, footprint.world_height(), sy, tol) {
            result.resolve_y(y, line);
        }
    }
}

/// Best alignment of an item's leading edge, center or trailing edge with a
/// wall's centerline or either face, within `tol`.
fn align_to_wall(
    origin: f64,
    size: f64,
    axis: f64,
    half_thickness: f64,
    tol: f64,
) -> Option<(f64, f64)> {
    let targets = [axis, axis - half_thickness, axis + half_thickness];
    let offsets = [0.0, size * 0.5, size];
    let mut best: Option<(f64, f64, f64)> = None;
    for &target in &targets {
        for &offset in &offsets {
            let gap = (origin + offset - target).abs();
            if gap < tol && best.is_none_or(|(g, _, _)| gap < g) {
                best = Some((gap, target - offset, target));
            }
        }
    }
    best.map(|(_, snapped, line)| (snapped, line))
}

fn snap_to_wall(
    result: &mut SnapResult,
    cursor: Point2,
    footprint: &ItemFootprint,
    wall: &Wall,
    tol: f64,
) {
    // Endpoints snap per axis inside their tolerance box.
    for endpoint in [wall.start, wall.end] {
        let near_x = (cursor.x - endpoint.x).abs() < tol;
        let near_y = (cursor.y - endpoint.y).abs() < tol;
        if !(near_x && near_y) {
            continue;
        }
        if !result.snapped_x {
            result.resolve_x(endpoint.x, endpoint.x);
        }
        if !result.snapped_y {
            result.resolve_y(endpoint.y, endpoint.y);
        }
        return;
    }

    let (w, h) = (footprint.world_width(), footprint.world_height());
    let center = Point2::new(cursor.x + w * 0.5, cursor.y + h * 0.5);
    let half_thickness = wall.half_thickness();
    let gap = point_to_segment_dist(&center, &wall.start, &wall.end);
    let foot = closest_point_on_segment(&center, &wall.start, &wall.end);

    if wall.is_horizontal() {
        if result.snapped_y || gap > tol + half_thickness + h * 0.5 {
            return;
        }
        if let Some((y, line)) = align_to_wall(cursor.y, h, foot.y, half_thickness, tol) {
            result.resolve_y(y, line);
        }
    } else {
        if result.snapped_x || gap > tol + half_thickness + w * 0.5 {
            return;
        }
        if let Some((x, line)) = align_to_wall(cursor.x, w, foot.x, half_thickness, tol) {
            result.resolve_x(x, line);
        }
    }
}
