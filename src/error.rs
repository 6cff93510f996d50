// Store error taxonomy
//
// Every variant renders as a one-line message the presentation layer can
// show directly. Validation and not-found conditions are values returned to
// the immediate caller; only I/O carries an underlying cause.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("missing required fields")]
    MissingFields,

    #[error("unrecognized priority (expected Low, Medium, or High)")]
    InvalidPriority,

    #[error("task not found")]
    NotFound,

    #[error("task is already completed")]
    AtFinalStatus,

    #[error("task is already at the earliest status")]
    AtInitialStatus,

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}
