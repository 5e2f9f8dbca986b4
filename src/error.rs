use thiserror::Error;

/// Top-level error type for the plan geometry engine.
#[derive(Debug, Error)]
pub enum PlanGeoError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("non-finite coordinate in {context}")]
    NonFinite { context: String },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors related to the plan entity collection and room authoring.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("wall {0} is already part of the room")]
    DuplicateWall(String),

    #[error("room is already closed")]
    RoomClosed,

    #[error("room has no walls")]
    EmptyRoom,
}

/// Errors related to operation parameters.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`PlanGeoError`].
pub type Result<T> = std::result::Result<T, PlanGeoError>;
