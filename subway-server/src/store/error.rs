//! Store error types.

use crate::domain::{LineId, StationId};

/// Errors from the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No station with this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// No line with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// Station names are unique
    #[error("a station named {0:?} already exists")]
    DuplicateStationName(String),

    /// Line names are unique
    #[error("a line named {0:?} already exists")]
    DuplicateLineName(String),

    /// Station is still referenced by a segment
    #[error("station {0} is still served by a line")]
    StationInUse(StationId),

    /// The line changed between read and write
    #[error("line {0} was modified concurrently; retry the request")]
    Conflict(LineId),

    /// A writer panicked while holding the lock
    #[error("store lock poisoned")]
    Poisoned,

    /// Reading or writing a snapshot failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}
