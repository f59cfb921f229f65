//! Topology error types.

use crate::domain::{Distance, StationId};

/// Errors raised when a line mutation would break the single-path invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    /// Both endpoints are already on the line
    #[error("stations {up} and {down} are both already on the line")]
    DuplicateConnection { up: StationId, down: StationId },

    /// Neither endpoint is on the line, so the segment would float free
    #[error("neither station {up} nor {down} is on the line")]
    Disconnected { up: StationId, down: StationId },

    /// A split must be strictly shorter than the segment it subdivides
    #[error("cannot split a segment of distance {existing} with a distance of {requested}")]
    InvalidSplitDistance {
        existing: Distance,
        requested: Distance,
    },

    /// Merging two segments overflowed the distance range
    #[error("merged distance is too large")]
    DistanceOverflow,

    /// Removal would leave the line without a segment
    #[error("line has only one segment; delete the line instead")]
    MinimumTopology,

    /// The station is not part of this line
    #[error("station {0} is not on the line")]
    StationNotOnLine(StationId),

    /// Stored segments do not form a single simple path
    #[error("segments do not form a single path: {0}")]
    NotAPath(&'static str),
}
