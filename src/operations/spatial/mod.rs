//! Live editing helpers: snapping a dragged item and checking whether it
//! may be dropped where it is.

mod placement;
mod snap;

pub use placement::{check_placement, rects_overlap, wall_corners, PlacementReport};
pub use snap::{SnapEngine, SnapParams, SnapResult};
