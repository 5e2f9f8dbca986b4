//! Structural checks over a reconstructed plan.
//!
//! Findings are split into issues, which should block save or export, and
//! advisory warnings.

mod input;

pub use input::{OpeningSize, RoomOutline, ValidationInput, WallRun};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::math::distance_2d::distance;
use crate::math::polygon_2d::{has_self_intersection, polygon_area, triangle_area};
use crate::math::points_equal;

/// Thresholds used by [`ValidatePlan`], in validation units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationParams {
    pub min_room_area: f64,
    pub min_wall_length: f64,
    /// Near-zero threshold for lengths, areas and point equality.
    pub tolerance: f64,
    /// Openings wider or taller than this are flagged.
    pub max_opening_size: f64,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            min_room_area: 1.0,
            min_wall_length: 0.1,
            tolerance: 0.01,
            max_opening_size: 3.0,
        }
    }
}

/// Aggregate figures for a validated plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatistics {
    pub room_count: usize,
    pub total_area: f64,
    pub wall_length: f64,
    pub opening_count: usize,
}

/// Result of [`ValidatePlan`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    /// `true` when there are no issues; warnings do not affect validity.
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub warnings: Vec<String>,
    pub statistics: PlanStatistics,
}

/// Validates rooms, walls and openings.
#[derive(Debug, Clone)]
pub struct ValidatePlan<'a> {
    input: &'a ValidationInput,
    params: ValidationParams,
}

impl<'a> ValidatePlan<'a> {
    /// Creates a new validation with default thresholds.
    #[must_use]
    pub fn new(input: &'a ValidationInput) -> Self {
        Self {
            input,
            params: ValidationParams::default(),
        }
    }

    /// Sets custom thresholds.
    #[must_use]
    pub fn with_params(mut self, params: ValidationParams) -> Self {
        self.params = params;
        self
    }

    /// Runs every check and collects the findings.
    #[must_use]
    pub fn execute(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        for room in &self.input.rooms {
            self.check_room(room, &mut report);
        }
        for wall in &self.input.walls {
            self.check_wall(wall, &mut report);
        }
        for opening in &self.input.openings {
            self.check_opening(opening, &mut report);
        }
        self.check_connectivity(&mut report);
        for id in &self.input.over_shared_walls {
            report
                .warnings
                .push(format!("Wall {id} is referenced by more than two rooms"));
        }

        report.statistics.room_count = self.input.rooms.len();
        report.statistics.opening_count = self.input.openings.len();
        report.is_valid = report.issues.is_empty();

        debug!(
            issues = report.issues.len(),
            warnings = report.warnings.len(),
            rooms = report.statistics.room_count,
            "validated plan"
        );
        report
    }

    fn check_room(&self, room: &RoomOutline, report: &mut ValidationReport) {
        let label = room.label();
        let points = &room.points;
        let tol = self.params.tolerance;

        if points.len() < 3 {
            report
                .issues
                .push(format!("Room {label} has fewer than 3 points"));
            return;
        }

        let area = polygon_area(points);
        report.statistics.total_area += area;
        if area < self.params.min_room_area {
            report.issues.push(format!(
                "Room {label} area {area:.3} is below the minimum of {}",
                self.params.min_room_area
            ));
        }

        if has_self_intersection(points) {
            report
                .issues
                .push(format!("Room {label} has self-intersecting boundaries"));
        }

        let n = points.len();
        let duplicates = (0..n)
            .filter(|&i| points_equal(&points[i], &points[(i + 1) % n], tol))
            .count();
        if duplicates > 0 {
            report.warnings.push(format!(
                "Room {label} has {duplicates} duplicate consecutive point(s)"
            ));
        }

        let collinear = (0..n)
            .filter(|&i| {
                let (a, b, c) = (&points[(i + n - 1) % n], &points[i], &points[(i + 1) % n]);
                !points_equal(a, b, tol)
                    && !points_equal(b, c, tol)
                    && triangle_area(a, b, c) < tol
            })
            .count();
        if collinear > 0 {
            report.warnings.push(format!(
                "Room {label} has {collinear} collinear vertex triple(s)"
            ));
        }
    }

    fn check_wall(&self, wall: &WallRun, report: &mut ValidationReport) {
        if wall.segments.is_empty() {
            report
                .issues
                .push(format!("Wall {} has no segments", wall.id));
            return;
        }
        for (i, seg) in wall.segments.iter().enumerate() {
            let length = seg.length();
            report.statistics.wall_length += length;
            if length < self.params.min_wall_length {
                report.issues.push(format!(
                    "Wall {} segment {i} length {length:.3} is below the minimum of {}",
                    wall.id, self.params.min_wall_length
                ));
            }
            if length < self.params.tolerance {
                report.warnings.push(format!(
                    "Wall {} segment {i} has near-zero length",
                    wall.id
                ));
            }
        }
    }

    fn check_opening(&self, opening: &OpeningSize, report: &mut ValidationReport) {
        let OpeningSize { id, width, height } = opening;
        if width.is_nan() || *width <= 0.0 || height.is_nan() || *height <= 0.0 {
            report.issues.push(format!(
                "Opening {id} has invalid dimensions {width} x {height}"
            ));
            return;
        }
        let max = self.params.max_opening_size;
        if *width > max || *height > max {
            report.warnings.push(format!(
                "Opening {id} is unusually large ({width:.2} x {height:.2})"
            ));
        }
    }

    /// Coarse check: some pair of rooms must share a vertex within ten tolerances.
    fn check_connectivity(&self, report: &mut ValidationReport) {
        let rooms = &self.input.rooms;
        if rooms.len() <= 1 {
            return;
        }
        let reach = 10.0 * self.params.tolerance;
        let connected = rooms.iter().enumerate().any(|(i, a)| {
            rooms[i + 1..].iter().any(|b| {
                a.points
                    .iter()
                    .any(|p| b.points.iter().any(|q| distance(p, q) <= reach))
            })
        });
        if !connected {
            report
                .warnings
                .push("Rooms appear to be disconnected from each other".to_string());
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Segment;
    use crate::math::Point2;
    use approx::assert_relative_eq;

    fn outline(id: &str, pts: &[(f64, f64)]) -> RoomOutline {
        RoomOutline {
            id: id.to_string(),
            name: String::new(),
            points: pts.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    fn wall(id: &str, ax: f64, ay: f64, bx: f64, by: f64) -> WallRun {
        WallRun {
            id: id.to_string(),
            segments: vec![Segment::new(Point2::new(ax, ay), Point2::new(bx, by))],
        }
    }

    #[test]
    fn clean_square_is_valid() {
        let input = ValidationInput {
            rooms: vec![outline("a", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])],
            walls: vec![wall("w1", 0.0, 0.0, 10.0, 0.0), wall("w2", 10.0, 0.0, 10.0, 10.0)],
            openings: vec![OpeningSize {
                id: "d1".to_string(),
                width: 0.9,
                height: 2.1,
            }],
            over_shared_walls: Vec::new(),
        };
        let report = ValidatePlan::new(&input).execute();
        assert!(report.is_valid, "{:?}", report.issues);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert_eq!(report.statistics.room_count, 1);
        assert_eq!(report.statistics.opening_count, 1);
        assert_relative_eq!(report.statistics.total_area, 100.0, epsilon = 1e-9);
        assert_relative_eq!(report.statistics.wall_length, 20.0, epsilon = 1e-9);
    }

    #[test]
    fn bowtie_is_flagged_as_self_intersecting() {
        let input = ValidationInput {
            rooms: vec![outline("bow", &[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)])],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert!(!report.is_valid);
        assert!(report
            .issues
            .iter()
            .any(|i| i.contains("self-intersecting")));
    }

    #[test]
    fn small_and_degenerate_rooms_are_issues() {
        let input = ValidationInput {
            rooms: vec![
                outline("tiny", &[(0.0, 0.0), (0.5, 0.0), (0.5, 0.5), (0.0, 0.5)]),
                outline("line", &[(0.0, 0.0), (1.0, 0.0)]),
            ],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert_eq!(report.issues.len(), 2);
        assert!(report.issues[0].contains("below the minimum"));
        assert!(report.issues[1].contains("fewer than 3 points"));
    }

    #[test]
    fn duplicate_and_collinear_points_are_warnings() {
        let input = ValidationInput {
            rooms: vec![outline(
                "a",
                &[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (10.0, 10.0), (0.0, 10.0)],
            )],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("duplicate")));
        assert!(report.warnings.iter().any(|w| w.contains("collinear")));
    }

    #[test]
    fn short_walls_and_empty_runs() {
        let input = ValidationInput {
            walls: vec![
                wall("stub", 0.0, 0.0, 0.05, 0.0),
                wall("dot", 0.0, 0.0, 0.001, 0.0),
                WallRun {
                    id: "empty".to_string(),
                    segments: Vec::new(),
                },
            ],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert_eq!(report.issues.len(), 3);
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("dot"));
    }

    #[test]
    fn opening_dimensions() {
        let input = ValidationInput {
            openings: vec![
                OpeningSize {
                    id: "zero".to_string(),
                    width: 0.0,
                    height: 2.0,
                },
                OpeningSize {
                    id: "garage".to_string(),
                    width: 5.0,
                    height: 2.2,
                },
            ],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].contains("zero"));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("garage"));
    }

    #[test]
    fn distant_rooms_warn_about_connectivity() {
        let far = ValidationInput {
            rooms: vec![
                outline("a", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
                outline("b", &[(50.0, 0.0), (60.0, 0.0), (60.0, 10.0), (50.0, 10.0)]),
            ],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&far).execute();
        assert!(report.warnings.iter().any(|w| w.contains("disconnected")));

        let adjacent = ValidationInput {
            rooms: vec![
                outline("a", &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]),
                outline("b", &[(10.0, 0.0), (20.0, 0.0), (20.0, 10.0), (10.0, 10.0)]),
            ],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&adjacent).execute();
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn over_shared_walls_are_warnings() {
        let input = ValidationInput {
            over_shared_walls: vec!["w9".to_string()],
            ..ValidationInput::default()
        };
        let report = ValidatePlan::new(&input).execute();
        assert!(report.is_valid);
        assert_eq!(report.warnings, ["Wall w9 is referenced by more than two rooms"]);
    }
}
