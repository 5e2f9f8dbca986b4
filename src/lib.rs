//! Geometry engine for a floor-plan editor.
//!
//! The batch path turns imported line work into rooms
//! ([`operations::ImportPlan`]); the interactive path recomputes derived
//! plan state after every edit ([`operations::assign_rooms`]) and answers
//! live snapping, placement and attachment queries.

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;
pub mod plan;

pub use error::{PlanGeoError, Result};
