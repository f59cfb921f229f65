//! Domain types for the subway network.
//!
//! This module contains the validated records the rest of the crate works
//! with: stations, lines and the segments that join stations on a line.
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod error;
mod line;
mod segment;
mod station;

pub use error::DomainError;
pub use line::{Line, LineDraft, LineName, MAX_EXTRA_FARE};
pub use segment::{Distance, Hop, LineId, Segment, SegmentId};
pub use station::{InvalidName, Station, StationId, StationName};
