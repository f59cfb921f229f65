//! Persistence collaborator for stations, lines and segments.
//!
//! The core never holds network state between calls. Every mutation or
//! query loads a snapshot through [`SubwayStore`], derives what it needs,
//! and writes back through the same trait.

mod error;
mod memory;
mod snapshot;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use snapshot::Snapshot;

use crate::domain::{Hop, Line, LineDraft, LineId, Segment, Station, StationId, StationName};

/// Storage operations the subway core depends on.
///
/// This abstraction allows the core to be tested against an in-memory
/// network and backed by anything that can honour these calls.
pub trait SubwayStore {
    /// Every segment on every line.
    fn all_segments(&self) -> Result<Vec<Segment>, StoreError>;

    /// Segments of one line, in stored order.
    fn segments_for_line(&self, line: LineId) -> Result<Vec<Segment>, StoreError>;

    /// Station records for the given ids. Unknown ids are skipped.
    fn stations_by_ids(&self, ids: &[StationId]) -> Result<Vec<Station>, StoreError>;

    fn all_stations(&self) -> Result<Vec<Station>, StoreError>;

    /// Create a station; names are unique.
    fn create_station(&self, name: StationName) -> Result<Station, StoreError>;

    /// Delete a station that no segment references.
    fn delete_station(&self, id: StationId) -> Result<(), StoreError>;

    /// Create a line together with its initial segments.
    fn create_line(&self, draft: LineDraft, hops: &[Hop]) -> Result<(Line, Vec<Segment>), StoreError>;

    fn all_lines(&self) -> Result<Vec<Line>, StoreError>;

    fn line(&self, id: LineId) -> Result<Line, StoreError>;

    /// Replace a line's attributes; names stay unique.
    fn update_line(&self, id: LineId, draft: LineDraft) -> Result<Line, StoreError>;

    /// Delete a line and all of its segments.
    fn delete_line(&self, id: LineId) -> Result<(), StoreError>;

    /// Swap a line's segments for `hops`, provided they still equal `expected`.
    ///
    /// Segments that survive unchanged keep their ids. If another writer got
    /// there first the call fails with [`StoreError::Conflict`] and nothing
    /// is written.
    fn replace_line_segments(
        &self,
        line: LineId,
        expected: &[Segment],
        hops: &[Hop],
    ) -> Result<Vec<Segment>, StoreError>;
}
