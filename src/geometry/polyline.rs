use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::math::{is_finite_point, Point2};

use super::Segment;

/// A raw polyline from an imported vector drawing.
///
/// For closed polylines, the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<Point2>,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
}

impl Polyline {
    #[must_use]
    pub fn new(points: Vec<Point2>, closed: bool) -> Self {
        Self {
            points,
            closed,
            thickness: None,
        }
    }

    /// Returns the number of segments in this polyline.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.points.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }

    /// Explodes the polyline into segments, skipping zero-length pieces.
    #[must_use]
    pub fn segments(&self) -> Vec<Segment> {
        let n = self.points.len();
        (0..self.segment_count())
            .filter_map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                if a == b {
                    return None;
                }
                let mut seg = Segment::new(a, b);
                seg.thickness = self.thickness;
                Some(seg)
            })
            .collect()
    }

    /// Rejects polylines carrying NaN or infinite coordinates.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NonFinite` naming the first offending vertex.
    pub fn check_finite(&self) -> Result<()> {
        if let Some(i) = self.points.iter().position(|p| !is_finite_point(p)) {
            return Err(GeometryError::NonFinite {
                context: format!("polyline vertex {i}"),
            }
            .into());
        }
        Ok(())
    }
}
