//! Batch import: clean raw line work, detect rooms and validate the result.

use serde::Serialize;
use tracing::info;

use super::clean::{CleanGeometry, CleanParams, CleanedGeometry};
use super::reconstruct::{CycleSearchParams, DetectRooms, DetectedRoom};
use super::validate::{ValidatePlan, ValidationInput, ValidationParams, ValidationReport};
use crate::error::Result;
use crate::geometry::{Polyline, Segment};

/// Output of [`ImportPlan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedPlan {
    pub cleaned: CleanedGeometry,
    pub rooms: Vec<DetectedRoom>,
    pub report: ValidationReport,
}

/// Runs the cleaner, room detection and validator over imported geometry.
#[derive(Debug, Clone)]
pub struct ImportPlan {
    polylines: Vec<Polyline>,
    segments: Vec<Segment>,
    clean: CleanParams,
    search: CycleSearchParams,
    validation: ValidationParams,
}

impl ImportPlan {
    #[must_use]
    pub fn new(polylines: Vec<Polyline>, segments: Vec<Segment>) -> Self {
        Self {
            polylines,
            segments,
            clean: CleanParams::default(),
            search: CycleSearchParams::default(),
            validation: ValidationParams::default(),
        }
    }

    #[must_use]
    pub fn with_clean_params(mut self, params: CleanParams) -> Self {
        self.clean = params;
        self
    }

    #[must_use]
    pub fn with_search_params(mut self, params: CycleSearchParams) -> Self {
        self.search = params;
        self
    }

    #[must_use]
    pub fn with_validation_params(mut self, params: ValidationParams) -> Self {
        self.validation = params;
        self
    }

    /// Executes the pipeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the input contains non-finite coordinates or a
    /// stage is given invalid parameters.
    pub fn execute(&self) -> Result<ImportedPlan> {
        let cleaned = CleanGeometry::new(self.polylines.clone(), self.segments.clone())
            .with_params(self.clean)
            .execute()?;

        let rooms = DetectRooms::new(cleaned.segments.clone())
            .with_params(self.search)
            .execute()?;

        let input = ValidationInput::from_detected(&rooms, &cleaned.segments);
        let report = ValidatePlan::new(&input)
            .with_params(self.validation)
            .execute();

        info!(
            segments = cleaned.segments.len(),
            rooms = rooms.len(),
            valid = report.is_valid,
            "imported plan"
        );

        Ok(ImportedPlan {
            cleaned,
            rooms,
            report,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    #[test]
    fn four_segments_make_one_square_room() {
        let p = Point2::new;
        let segments = vec![
            Segment::new(p(0.0, 0.0), p(10.0, 0.0)),
            Segment::new(p(10.0, 0.0), p(10.0, 10.0)),
            Segment::new(p(10.0, 10.0), p(0.0, 10.0)),
            Segment::new(p(0.0, 10.0), p(0.0, 0.0)),
        ];
        let out = ImportPlan::new(Vec::new(), segments).execute().unwrap();
        assert_eq!(out.rooms.len(), 1);
        assert_eq!(out.rooms[0].polygon.len(), 4);
        assert_relative_eq!(out.rooms[0].area, 100.0, epsilon = 1e-9);
        assert!(out.report.is_valid);
        assert_eq!(out.report.statistics.room_count, 1);
    }

    #[test]
    fn split_collinear_wall_is_merged_before_detection() {
        let p = Point2::new;
        let pl = Polyline::new(
            vec![p(0.0, 0.0), p(5.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)],
            true,
        );
        let out = ImportPlan::new(vec![pl], Vec::new()).execute().unwrap();
        assert_eq!(out.cleaned.segments.len(), 4);
        assert_eq!(out.rooms[0].polygon.len(), 4);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let p = Point2::new;
        let segments = vec![Segment::new(p(0.0, 0.0), p(f64::NAN, 0.0))];
        assert!(ImportPlan::new(Vec::new(), segments).execute().is_err());
    }
}
