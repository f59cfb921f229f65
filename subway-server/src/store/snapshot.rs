//! JSON snapshots of a [`MemoryStore`] on disk.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Line, MAX_EXTRA_FARE, Segment, Station};
use crate::topology::LineTopology;

use super::memory::Tables;
use super::{MemoryStore, StoreError};

/// Everything a [`MemoryStore`] holds, in a serialisable form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub stations: Vec<Station>,
    pub lines: Vec<Line>,
    pub segments: Vec<Segment>,
}

fn snapshot_error(message: String) -> StoreError {
    StoreError::Snapshot { message }
}

impl MemoryStore {
    /// Build a store from a snapshot, checking it is internally consistent.
    ///
    /// Station and line names must be unique, every segment must belong to a
    /// known line and join known stations, and each line's segments must form
    /// a single path.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, StoreError> {
        let mut tables = Tables::default();

        let mut station_names = HashSet::new();
        for station in snapshot.stations {
            if !station_names.insert(station.name.clone()) {
                return Err(StoreError::DuplicateStationName(station.name.into()));
            }
            tables.next_station = tables.next_station.max(station.id.0);
            if tables.stations.insert(station.id, station).is_some() {
                return Err(snapshot_error("duplicate station id".to_string()));
            }
        }

        let mut line_names = HashSet::new();
        for line in snapshot.lines {
            if !line_names.insert(line.name().clone()) {
                return Err(StoreError::DuplicateLineName(line.draft.name.into()));
            }
            if line.extra_fare() > MAX_EXTRA_FARE {
                return Err(snapshot_error(format!(
                    "line {}: extra fare {} exceeds {MAX_EXTRA_FARE}",
                    line.id,
                    line.extra_fare()
                )));
            }
            tables.next_line = tables.next_line.max(line.id.0);
            if tables.lines.insert(line.id, line).is_some() {
                return Err(snapshot_error("duplicate line id".to_string()));
            }
        }

        let mut segment_ids = HashSet::new();
        let mut by_line: BTreeMap<_, Vec<Segment>> = BTreeMap::new();
        for segment in snapshot.segments {
            if !tables.lines.contains_key(&segment.line_id) {
                return Err(StoreError::LineNotFound(segment.line_id));
            }
            for id in [segment.up_station_id, segment.down_station_id] {
                if !tables.stations.contains_key(&id) {
                    return Err(StoreError::StationNotFound(id));
                }
            }
            if !segment_ids.insert(segment.id) {
                return Err(snapshot_error(format!("duplicate segment id {}", segment.id)));
            }
            tables.next_segment = tables.next_segment.max(segment.id.0);
            by_line.entry(segment.line_id).or_default().push(segment);
        }

        for (line, segments) in by_line {
            LineTopology::from_segments(&segments)
                .map_err(|e| snapshot_error(format!("line {line}: {e}")))?;
            tables.segments.insert(line, segments);
        }

        Ok(Self::from_tables(tables))
    }

    /// Copy the current contents out as a snapshot.
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let tables = self.read()?;
        Ok(Snapshot {
            stations: tables.stations.values().cloned().collect(),
            lines: tables.lines.values().cloned().collect(),
            segments: tables.segments.values().flatten().cloned().collect(),
        })
    }

    /// Load a store from a JSON snapshot file.
    pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| snapshot_error(format!("failed to read {}: {e}", path.display())))?;
        let snapshot: Snapshot = serde_json::from_str(&contents)
            .map_err(|e| snapshot_error(format!("failed to parse {}: {e}", path.display())))?;

        let store = Self::from_snapshot(snapshot)?;
        info!(path = %path.display(), "loaded network snapshot");
        Ok(store)
    }

    /// Write the current contents to a JSON snapshot file.
    ///
    /// Creates parent directories if they don't exist.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let snapshot = self.snapshot()?;

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| snapshot_error(format!("failed to create directory: {e}")))?;
        }

        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| snapshot_error(format!("failed to serialize snapshot: {e}")))?;
        std::fs::write(path, json)
            .map_err(|e| snapshot_error(format!("failed to write {}: {e}", path.display())))?;

        info!(path = %path.display(), "saved network snapshot");
        Ok(())
    }
}
