#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use plangeo::geometry::{Polyline, Segment};
use plangeo::math::Point2;
use plangeo::operations::clean::snap_coordinates;
use plangeo::operations::{CleanGeometry, CleanParams, ImportPlan};

fn p(x: f64, y: f64) -> Point2 {
    Point2::new(x, y)
}

#[test]
fn square_from_four_segments_is_one_room() {
    common::init_tracing();
    let segments = vec![
        Segment::new(p(0.0, 0.0), p(10.0, 0.0)),
        Segment::new(p(10.0, 0.0), p(10.0, 10.0)),
        Segment::new(p(10.0, 10.0), p(0.0, 10.0)),
        Segment::new(p(0.0, 10.0), p(0.0, 0.0)),
    ];
    let out = ImportPlan::new(Vec::new(), segments).execute().unwrap();

    assert_eq!(out.rooms.len(), 1);
    let room = &out.rooms[0];
    assert_eq!(room.polygon.len(), 4);
    assert_relative_eq!(room.area, 100.0, epsilon = 1e-9);
    let c = room.centroid.unwrap();
    assert_relative_eq!(c.x, 5.0, epsilon = 1e-9);
    assert_relative_eq!(c.y, 5.0, epsilon = 1e-9);
    assert!(out.report.is_valid, "{:?}", out.report.issues);
}

#[test]
fn noisy_apartment_outline_yields_two_rooms() {
    common::init_tracing();
    // Outer shell drawn as one closed polyline with jitter and a split wall,
    // plus a partition drawn as a loose segment.
    let shell = Polyline::new(
        vec![
            p(0.0002, 0.0),
            p(6.0, 0.0001),
            p(12.0, 0.0),
            p(12.0, 8.0),
            p(12.0003, 8.0),
            p(0.0, 8.0),
        ],
        true,
    );
    let partition = Segment::new(p(6.0, 0.0), p(6.0, 8.0)).with_id("partition");
    let out = ImportPlan::new(vec![shell], vec![partition])
        .execute()
        .unwrap();

    assert_eq!(out.rooms.len(), 2);
    for room in &out.rooms {
        assert_relative_eq!(room.area, 48.0, epsilon = 1e-6);
    }
    assert!(out.report.is_valid, "{:?}", out.report.issues);
    assert!(out.cleaned.stats.removed_points >= 1);
}

#[test]
fn office_floor_with_partitions_yields_six_rooms() {
    common::init_tracing();
    // Shell drawn from the middle of the bottom wall.
    let shell = Polyline::new(
        vec![p(15.0, 0.0), p(30.0, 0.0), p(30.0, 20.0), p(0.0, 20.0), p(0.0, 0.0)],
        true,
    );
    let partitions = vec![
        Segment::new(p(10.0, 0.0), p(10.0, 20.0)),
        Segment::new(p(20.0, 0.0), p(20.0, 20.0)),
        Segment::new(p(0.0, 10.0), p(10.0, 10.0)),
        Segment::new(p(10.0, 10.0), p(20.0, 10.0)),
        Segment::new(p(20.0, 10.0), p(30.0, 10.0)),
    ];
    let out = ImportPlan::new(vec![shell], partitions).execute().unwrap();

    assert_eq!(out.rooms.len(), 6);
    for room in &out.rooms {
        assert_eq!(room.polygon.len(), 4, "{:?}", room.polygon);
        assert_relative_eq!(room.area, 100.0, epsilon = 1e-6);
    }
    assert_eq!(out.report.statistics.room_count, 6);
}

#[test]
fn overlapping_duplicate_wall_is_reported_as_shared() {
    common::init_tracing();
    let segments = vec![
        Segment::new(p(0.0, 0.0), p(10.0, 0.0)).with_id("a"),
        Segment::new(p(10.0, 0.0), p(10.0, 5.0)).with_id("turn"),
        Segment::new(p(10.0, 0.0), p(4.0, 0.0)).with_id("dup"),
    ];
    let cleaned = CleanGeometry::new(Vec::new(), segments)
        .with_params(CleanParams::default())
        .execute()
        .unwrap();
    assert!(cleaned
        .shared_walls
        .iter()
        .any(|s| s.first_id.as_deref() == Some("a") && s.second_id.as_deref() == Some("dup")));
}

#[test]
fn snapping_is_idempotent() {
    let pts = vec![p(0.12345, 9.87654), p(-3.00049, 2.5)];
    let once = snap_coordinates(&pts, 1e-3);
    let twice = snap_coordinates(&once, 1e-3);
    assert_eq!(once, twice);
}

#[test]
fn nan_coordinates_are_rejected_at_the_boundary() {
    let pl = Polyline::new(vec![p(0.0, 0.0), p(f64::INFINITY, 1.0)], false);
    assert!(ImportPlan::new(vec![pl], Vec::new()).execute().is_err());
}
