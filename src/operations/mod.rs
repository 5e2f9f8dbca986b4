//! Engine operations.
//!
//! Batch path: [`clean`] → [`reconstruct`] → [`validate`], chained by
//! [`pipeline::ImportPlan`]. Interactive path: [`spatial`] and [`attach`]
//! while editing, then [`assign::assign_rooms`] after every mutation.

pub mod assign;
pub mod attach;
pub mod clean;
pub mod pipeline;
pub mod reconstruct;
pub mod spatial;
pub mod validate;

pub use assign::{assign_rooms, AssignRooms, AssignedPlan};
pub use attach::{attachment_line, find_attached_wall_id, line_touches_wall, AttachParams};
pub use clean::{CleanGeometry, CleanParams, CleanedGeometry};
pub use pipeline::{ImportPlan, ImportedPlan};
pub use reconstruct::{
    compute_room, compute_rooms, CycleSearchParams, DetectRooms, DetectedRoom, TraversalParams,
};
pub use spatial::{check_placement, PlacementReport, SnapEngine, SnapParams, SnapResult};
pub use validate::{ValidatePlan, ValidationInput, ValidationParams, ValidationReport};
