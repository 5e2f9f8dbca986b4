#![allow(clippy::unwrap_used)]

mod common;

use approx::assert_relative_eq;
use plangeo::math::Point2;
use plangeo::operations::{
    assign_rooms, check_placement, find_attached_wall_id, AttachParams, SnapEngine, SnapParams,
    ValidatePlan, ValidationInput,
};
use plangeo::plan::{
    ItemFootprint, PlacedItem, PlanSnapshot, RoomBuilder, RoomDefinition, WallDirection, WallRef,
};

const PLAN: &str = r#"{
    "walls": [
        {"id": "south", "start": {"x": 0, "y": 0}, "end": {"x": 400, "y": 0}, "thickness": 10},
        {"id": "east", "start": {"x": 400, "y": 0}, "end": {"x": 400, "y": 300}, "thickness": 10},
        {"id": "north", "start": {"x": 0, "y": 300}, "end": {"x": 400, "y": 300}, "thickness": 10},
        {"id": "west", "start": {"x": 0, "y": 300}, "end": {"x": 0, "y": 0}, "thickness": 10}
    ],
    "rooms": [],
    "objects": [
        {"id": "sofa", "file": "sofa.svg", "x": 50, "y": 50, "width": 80, "height": 40},
        {"id": "door", "file": "door.svg", "subtype": "door", "x": 200, "y": -5, "width": 10, "height": 80,
         "roomId": "stale", "attachedToWallId": "east"},
        {"id": "window", "file": "window.svg", "subtype": "window", "x": 100, "y": 295, "width": 60, "height": 10}
    ]
}"#;

fn load() -> PlanSnapshot {
    let plan: PlanSnapshot = serde_json::from_str(PLAN).unwrap();
    plan.check_finite().unwrap();
    plan
}

fn draw_living_room(plan: &PlanSnapshot) -> RoomDefinition {
    let mut builder = RoomBuilder::new();
    for id in ["south", "east", "north", "west"] {
        builder.add_wall(plan.wall(id).unwrap()).unwrap();
    }
    assert!(builder.is_closed());
    assert_eq!(builder.wall_sequence()[2].direction, WallDirection::Reverse);
    builder.commit("living", "Living room", "#ffeecc", "oak").unwrap()
}

#[test]
fn authored_room_is_closed_and_assigned() {
    common::init_tracing();
    let mut plan = load();
    let living = draw_living_room(&plan);
    plan.rooms.push(living);

    let out = assign_rooms(&plan);
    let room = &out.rooms[0];
    assert!(room.is_closed());
    assert_eq!(room.pseudo_segment_count(), 0);
    assert_relative_eq!(room.area(), 120_000.0, epsilon = 1e-6);

    assert!(out
        .plan
        .walls
        .iter()
        .all(|w| w.room_ids == ["living"]));

    let sofa = out.plan.item("sofa").unwrap();
    assert_eq!(sofa.room_id.as_deref(), Some("living"));

    let door = out.plan.item("door").unwrap();
    assert_eq!(door.attached_to_wall_id.as_deref(), Some("south"));
    assert_eq!(door.room_id.as_deref(), Some("living"));

    let window = out.plan.item("window").unwrap();
    assert_eq!(window.attached_to_wall_id.as_deref(), Some("north"));

    let input = ValidationInput::from_plan(&out.plan, &out.rooms, 0.01);
    let report = ValidatePlan::new(&input).execute();
    assert!(report.is_valid, "{:?}", report.issues);
    assert_eq!(report.statistics.opening_count, 2);
    assert_relative_eq!(report.statistics.total_area, 12.0, epsilon = 1e-9);
}

#[test]
fn recompute_after_moving_the_door_away() {
    common::init_tracing();
    let mut plan = load();
    let living = draw_living_room(&plan);
    plan.rooms.push(living);

    plan.item_mut("door").unwrap().y += 100.0;
    let out = assign_rooms(&plan);
    let door = out.plan.item("door").unwrap();
    assert_eq!(door.attached_to_wall_id, None);
    assert_eq!(door.room_id.as_deref(), Some("living"));

    let entities = out.plan.entities();
    let moved = out.plan.item("door").unwrap();
    assert_eq!(find_attached_wall_id(moved, &entities, &AttachParams::default()), None);
}

#[test]
fn incomplete_room_is_bridged_and_flagged() {
    common::init_tracing();
    let mut plan = load();
    plan.rooms.push(RoomDefinition::new(
        "nook",
        vec![WallRef::forward("south"), WallRef::forward("east")],
    ));
    let out = assign_rooms(&plan);
    let nook = &out.rooms[0];
    assert_eq!(nook.pseudo_segment_count(), 1);
    assert!(nook.is_valid_polygon());
}

#[test]
fn dragged_item_snaps_flush_and_placement_is_checked() {
    common::init_tracing();
    let plan = load();
    let entities = plan.entities();
    let engine = SnapEngine::new(SnapParams::default());

    let sofa = plan.item("sofa").unwrap();
    let fp = ItemFootprint::new(30.0, 30.0, 1.0);
    // Left edge 4 units right of the sofa's right edge at x = 130.
    let snapped = engine.snap(Point2::new(134.0, 150.0), &fp, &entities, Some("chair"));
    assert!(snapped.snapped_x);
    assert_relative_eq!(snapped.x, 130.0);

    let mut placed = PlacedItem::new("chair", snapped.x, snapped.y, 30.0, 30.0);
    assert!(check_placement(&placed, &entities).is_valid);

    placed.x = sofa.x + 10.0;
    placed.y = sofa.y + 10.0;
    let report = check_placement(&placed, &entities);
    assert_eq!(report.item_collisions, ["sofa"]);
}
