//! Segment topology of a single line.
//!
//! A line's segments must always form one simple path. [`LineTopology`]
//! holds that path in order and exposes insertion and removal as pure
//! functions returning a new, validated topology. Nothing here touches the
//! store: callers load a snapshot, transform it, and save the result.

mod error;
mod line;

pub use error::TopologyError;
pub use line::LineTopology;
