use thiserror::Error;

/// Errors raised while assembling or configuring a movement controller.
///
/// Every variant is fatal for the controller being built. Bad per-tick input
/// is never reported here; it is sanitized in place.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControllerError {
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),
    #[error("tunable `{name}` must be finite and positive (got {value})")]
    InvalidTunable { name: &'static str, value: f32 },
    #[error("scene block `{name}` has non-positive half extents")]
    DegenerateBlock { name: String },
}
