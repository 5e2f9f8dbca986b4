//! Normalization of raw imported line work.
//!
//! The pipeline order is fixed: snap → dedup → merge collinear → detect
//! shared walls. Each stage consumes only the previous stage's output.

mod dedup;
mod merge;
mod shared;
mod snap;

pub use dedup::remove_duplicates;
pub use merge::{merge_collinear_loop, merge_collinear_segments};
pub use shared::{detect_shared_walls, SharedWall};
pub use snap::{snap_coordinates, snap_point, snap_value};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Polyline, Segment};
use crate::math::{points_equal, CLEAN_EPSILON};

/// Tolerances for the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanParams {
    /// Snapping grid and point-equality tolerance.
    pub epsilon: f64,
    /// Maximum direction change, in degrees, for two segments to count as collinear.
    pub angle_threshold_deg: f64,
    /// Minimum overlap length for a shared-wall report.
    pub min_shared_overlap: f64,
}

impl Default for CleanParams {
    fn default() -> Self {
        Self {
            epsilon: CLEAN_EPSILON,
            angle_threshold_deg: 2.0,
            min_shared_overlap: 0.1,
        }
    }
}

/// Counters describing what the cleaner changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    pub input_segments: usize,
    pub removed_points: usize,
    pub collapsed_segments: usize,
    pub merged_segments: usize,
    pub output_segments: usize,
}

/// Output of [`CleanGeometry`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedGeometry {
    pub segments: Vec<Segment>,
    pub shared_walls: Vec<SharedWall>,
    pub stats: CleanStats,
}

/// Turns raw polylines and loose segments into a de-noised segment set.
#[derive(Debug, Clone)]
pub struct CleanGeometry {
    polylines: Vec<Polyline>,
    segments: Vec<Segment>,
    params: CleanParams,
}

impl CleanGeometry {
    /// Creates a new cleaning operation with default parameters.
    #[must_use]
    pub fn new(polylines: Vec<Polyline>, segments: Vec<Segment>) -> Self {
        Self {
            polylines,
            segments,
            params: CleanParams::default(),
        }
    }

    /// Sets custom tolerances.
    #[must_use]
    pub fn with_params(mut self, params: CleanParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` for a non-positive epsilon or
    /// negative angle threshold, and `GeometryError::NonFinite` if any input
    /// coordinate is NaN or infinite.
    pub fn execute(&self) -> Result<CleanedGeometry> {
        let p = self.params;
        if !p.epsilon.is_finite() || p.epsilon <= 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "cleaning epsilon must be positive, got {}",
                p.epsilon
            ))
            .into());
        }
        if p.angle_threshold_deg.is_nan() || p.angle_threshold_deg < 0.0 {
            return Err(OperationError::InvalidInput(format!(
                "angle threshold must be non-negative, got {}",
                p.angle_threshold_deg
            ))
            .into());
        }
        for pl in &self.polylines {
            pl.check_finite()?;
        }
        for seg in &self.segments {
            seg.check_finite()?;
        }

        let mut stats = CleanStats::default();
        let mut snapped = 0;
        let mut merged: Vec<Segment> = Vec::new();

        // Stages 1 + 2: snap and de-duplicate each ordered sequence, then
        // stage 3 per polyline so closed loops merge across their seam.
        for pl in &self.polylines {
            stats.input_segments += pl.segment_count();
            let pts = snap_coordinates(&pl.points, p.epsilon);
            let mut pts = remove_duplicates(&pts, p.epsilon);
            if pl.closed && pts.len() > 1 && points_equal(&pts[0], &pts[pts.len() - 1], p.epsilon)
            {
                pts.pop();
            }
            stats.removed_points += pl.points.len() - pts.len();
            let cleaned = Polyline {
                points: pts,
                closed: pl.closed,
                thickness: pl.thickness,
            };
            let segments = cleaned.segments();
            snapped += segments.len();
            merged.extend(if cleaned.closed {
                merge_collinear_loop(&segments, p.epsilon, p.angle_threshold_deg)
            } else {
                merge_collinear_segments(&segments, p.epsilon, p.angle_threshold_deg)
            });
        }
        let mut loose: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for seg in &self.segments {
            stats.input_segments += 1;
            let a = snap_point(&seg.a, p.epsilon);
            let b = snap_point(&seg.b, p.epsilon);
            if points_equal(&a, &b, p.epsilon) {
                stats.collapsed_segments += 1;
                continue;
            }
            loose.push(Segment {
                a,
                b,
                id: seg.id.clone(),
                thickness: seg.thickness,
            });
        }
        snapped += loose.len();
        merged.extend(merge_collinear_segments(&loose, p.epsilon, p.angle_threshold_deg));
        stats.merged_segments = snapped - merged.len();
        stats.output_segments = merged.len();

        // Stage 4.
        let shared_walls =
            detect_shared_walls(&merged, p.epsilon, p.angle_threshold_deg, p.min_shared_overlap);

        debug!(
            input = stats.input_segments,
            output = stats.output_segments,
            merged = stats.merged_segments,
            removed_points = stats.removed_points,
            shared = shared_walls.len(),
            "cleaned imported geometry"
        );

        Ok(CleanedGeometry {
            segments: merged,
            shared_walls,
            stats,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    #[test]
    fn noisy_closed_square_becomes_four_segments() {
        let pl = Polyline::new(
            vec![
                Point2::new(0.0002, -0.0001),
                Point2::new(5.0, 0.0003),
                Point2::new(10.0, 0.0),
                Point2::new(10.0004, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
                Point2::new(0.0, 0.0),
            ],
            true,
        );
        let out = CleanGeometry::new(vec![pl], Vec::new()).execute().unwrap();
        assert_eq!(out.segments.len(), 4, "{:?}", out.segments);
        assert_eq!(out.stats.removed_points, 2);
        assert_eq!(out.stats.merged_segments, 1);
        assert!(out.shared_walls.is_empty());
    }

    #[test]
    fn closed_polyline_starting_mid_wall_loses_its_seam() {
        let pl = Polyline::new(
            vec![
                Point2::new(5.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
                Point2::new(0.0, 10.0),
                Point2::new(0.0, 0.0),
            ],
            true,
        );
        let out = CleanGeometry::new(vec![pl], Vec::new()).execute().unwrap();
        assert_eq!(out.segments.len(), 4, "{:?}", out.segments);
        assert_eq!(out.stats.merged_segments, 1);
        assert!(out
            .segments
            .iter()
            .all(|s| s.a != Point2::new(5.0, 0.0) && s.b != Point2::new(5.0, 0.0)));
    }

    #[test]
    fn collapsed_loose_segment_is_dropped() {
        let segs = vec![
            Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0004, 0.0)),
            Segment::new(Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)),
        ];
        let out = CleanGeometry::new(Vec::new(), segs).execute().unwrap();
        assert_eq!(out.stats.collapsed_segments, 1);
        assert_eq!(out.segments.len(), 1);
    }

    #[test]
    fn overlapping_import_is_flagged() {
        let segs = vec![
            Segment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)).with_id("a"),
            Segment::new(Point2::new(0.0, 0.0), Point2::new(0.0, 10.0)),
            Segment::new(Point2::new(0.0, 0.0), Point2::new(6.0, 0.0)).with_id("dup"),
        ];
        let out = CleanGeometry::new(Vec::new(), segs).execute().unwrap();
        assert_eq!(out.shared_walls.len(), 1);
        assert_eq!(out.shared_walls[0].second_id.as_deref(), Some("dup"));
    }

    #[test]
    fn rejects_bad_params_and_nan_input() {
        let params = CleanParams {
            epsilon: 0.0,
            ..CleanParams::default()
        };
        assert!(CleanGeometry::new(Vec::new(), Vec::new())
            .with_params(params)
            .execute()
            .is_err());

        let nan = Segment::new(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 0.0));
        assert!(CleanGeometry::new(Vec::new(), vec![nan]).execute().is_err());
    }
}
