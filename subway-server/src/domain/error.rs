//! Domain error types.
//!
//! These errors represent validation failures of raw input in the domain
//! layer. They are distinct from topology and storage errors.

use super::{InvalidName, MAX_EXTRA_FARE, StationId};

/// Domain-level errors for validation of raw values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// A name failed validation
    #[error(transparent)]
    Name(#[from] InvalidName),

    /// Segment distances must be strictly positive
    #[error("distance must be a positive integer, got {0}")]
    NonPositiveDistance(i64),

    /// Distance does not fit the supported range
    #[error("distance {0} is too large")]
    DistanceTooLarge(i64),

    /// Line surcharge above the supported maximum
    #[error("extra fare {0} exceeds the maximum of {max}", max = MAX_EXTRA_FARE)]
    ExtraFareTooLarge(u64),

    /// A segment cannot start and end at the same station
    #[error("segment cannot connect station {0} to itself")]
    LoopSegment(StationId),
}
