//! Room reconstruction.
//!
//! Two paths produce room boundaries:
//! - [`DetectRooms`] recovers closed regions from raw, cleaned line work by
//!   tracing the faces of the wall graph.
//! - [`compute_room`] rebuilds an authored room from its ordered wall
//!   references, bridging gaps with pseudo segments.

mod cycles;
mod graph;
mod traverse;

pub use cycles::{CycleSearchParams, DetectRooms, DetectedRoom};
pub use graph::{GridKey, NodeId, WallGraph};
pub use traverse::{compute_room, compute_rooms, TraversalParams};
