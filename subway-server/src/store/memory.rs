//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{
    Hop, Line, LineDraft, LineId, Segment, SegmentId, Station, StationId, StationName,
};

use super::{StoreError, SubwayStore};

/// Backing tables plus id counters.
#[derive(Debug, Default)]
pub(super) struct Tables {
    pub(super) stations: BTreeMap<StationId, Station>,
    pub(super) lines: BTreeMap<LineId, Line>,
    pub(super) segments: BTreeMap<LineId, Vec<Segment>>,
    pub(super) next_station: u64,
    pub(super) next_line: u64,
    pub(super) next_segment: u64,
}

impl Tables {
    fn allocate_segment(&mut self) -> SegmentId {
        self.next_segment += 1;
        SegmentId(self.next_segment)
    }

    fn require_stations(&self, hops: &[Hop]) -> Result<(), StoreError> {
        for hop in hops {
            for id in [hop.up(), hop.down()] {
                if !self.stations.contains_key(&id) {
                    return Err(StoreError::StationNotFound(id));
                }
            }
        }
        Ok(())
    }

    fn line_name_taken(&self, name: &str, except: Option<LineId>) -> bool {
        self.lines
            .values()
            .any(|l| l.name().as_str() == name && Some(l.id) != except)
    }

    /// Turn `hops` into segments of `line`, reusing ids from `previous`
    /// wherever a hop is unchanged.
    fn materialise(&mut self, line: LineId, previous: &[Segment], hops: &[Hop]) -> Vec<Segment> {
        let mut reusable: Vec<&Segment> = previous.iter().collect();
        let mut segments = Vec::with_capacity(hops.len());

        for hop in hops {
            let id = match reusable.iter().position(|s| s.matches(hop)) {
                Some(i) => reusable.swap_remove(i).id,
                None => self.allocate_segment(),
            };
            segments.push(Segment {
                id,
                line_id: line,
                up_station_id: hop.up(),
                down_station_id: hop.down(),
                distance: hop.distance(),
            });
        }

        segments
    }
}

/// Store keeping the whole network in memory behind a read-write lock.
///
/// Ids are allocated from per-table counters and never reused.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn from_tables(tables: Tables) -> Self {
        Self {
            tables: RwLock::new(tables),
        }
    }

    pub(super) fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }
}

impl SubwayStore for MemoryStore {
    fn all_segments(&self) -> Result<Vec<Segment>, StoreError> {
        let tables = self.read()?;
        Ok(tables.segments.values().flatten().cloned().collect())
    }

    fn segments_for_line(&self, line: LineId) -> Result<Vec<Segment>, StoreError> {
        let tables = self.read()?;
        if !tables.lines.contains_key(&line) {
            return Err(StoreError::LineNotFound(line));
        }
        Ok(tables.segments.get(&line).cloned().unwrap_or_default())
    }

    fn stations_by_ids(&self, ids: &[StationId]) -> Result<Vec<Station>, StoreError> {
        let tables = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.stations.get(id))
            .cloned()
            .collect())
    }

    fn all_stations(&self) -> Result<Vec<Station>, StoreError> {
        let tables = self.read()?;
        Ok(tables.stations.values().cloned().collect())
    }

    fn create_station(&self, name: StationName) -> Result<Station, StoreError> {
        let mut tables = self.write()?;
        if tables.stations.values().any(|s| s.name == name) {
            return Err(StoreError::DuplicateStationName(name.into()));
        }
        tables.next_station += 1;
        let station = Station::new(StationId(tables.next_station), name);
        tables.stations.insert(station.id, station.clone());
        Ok(station)
    }

    fn delete_station(&self, id: StationId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if !tables.stations.contains_key(&id) {
            return Err(StoreError::StationNotFound(id));
        }
        let in_use = tables
            .segments
            .values()
            .flatten()
            .any(|s| s.up_station_id == id || s.down_station_id == id);
        if in_use {
            return Err(StoreError::StationInUse(id));
        }
        tables.stations.remove(&id);
        Ok(())
    }

    fn create_line(&self, draft: LineDraft, hops: &[Hop]) -> Result<(Line, Vec<Segment>), StoreError> {
        let mut tables = self.write()?;
        if tables.line_name_taken(draft.name.as_str(), None) {
            return Err(StoreError::DuplicateLineName(draft.name.into()));
        }
        tables.require_stations(hops)?;

        tables.next_line += 1;
        let line = Line {
            id: LineId(tables.next_line),
            draft,
        };
        let segments = tables.materialise(line.id, &[], hops);
        tables.lines.insert(line.id, line.clone());
        tables.segments.insert(line.id, segments.clone());
        Ok((line, segments))
    }

    fn all_lines(&self) -> Result<Vec<Line>, StoreError> {
        let tables = self.read()?;
        Ok(tables.lines.values().cloned().collect())
    }

    fn line(&self, id: LineId) -> Result<Line, StoreError> {
        let tables = self.read()?;
        tables
            .lines
            .get(&id)
            .cloned()
            .ok_or(StoreError::LineNotFound(id))
    }

    fn update_line(&self, id: LineId, draft: LineDraft) -> Result<Line, StoreError> {
        let mut tables = self.write()?;
        if !tables.lines.contains_key(&id) {
            return Err(StoreError::LineNotFound(id));
        }
        if tables.line_name_taken(draft.name.as_str(), Some(id)) {
            return Err(StoreError::DuplicateLineName(draft.name.into()));
        }
        let line = Line { id, draft };
        tables.lines.insert(id, line.clone());
        Ok(line)
    }

    fn delete_line(&self, id: LineId) -> Result<(), StoreError> {
        let mut tables = self.write()?;
        if tables.lines.remove(&id).is_none() {
            return Err(StoreError::LineNotFound(id));
        }
        tables.segments.remove(&id);
        Ok(())
    }

    fn replace_line_segments(
        &self,
        line: LineId,
        expected: &[Segment],
        hops: &[Hop],
    ) -> Result<Vec<Segment>, StoreError> {
        let mut tables = self.write()?;
        if !tables.lines.contains_key(&line) {
            return Err(StoreError::LineNotFound(line));
        }

        let current = tables.segments.get(&line).cloned().unwrap_or_default();
        if current != expected {
            return Err(StoreError::Conflict(line));
        }
        tables.require_stations(hops)?;

        let segments = tables.materialise(line, &current, hops);
        tables.segments.insert(line, segments.clone());
        Ok(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Distance;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    fn hop(up: StationId, down: StationId, distance: i64) -> Hop {
        Hop::new(up, down, Distance::new(distance).unwrap()).unwrap()
    }

    fn draft(name: &str) -> LineDraft {
        LineDraft::new(name, "bg-red-600", 0).unwrap()
    }

    fn store_with_stations(names: &[&str]) -> (MemoryStore, Vec<StationId>) {
        let store = MemoryStore::new();
        let ids = names
            .iter()
            .map(|n| store.create_station(name(n)).unwrap().id)
            .collect();
        (store, ids)
    }

    #[test]
    fn station_ids_increase() {
        let (_, ids) = store_with_stations(&["Gangnam", "Yeoksam"]);
        assert_eq!(ids, vec![StationId(1), StationId(2)]);
    }

    #[test]
    fn duplicate_station_name_rejected() {
        let (store, _) = store_with_stations(&["Gangnam"]);
        assert_eq!(
            store.create_station(name(" Gangnam ")),
            Err(StoreError::DuplicateStationName("Gangnam".into()))
        );
    }

    #[test]
    fn stations_by_ids_skips_unknown() {
        let (store, ids) = store_with_stations(&["Gangnam", "Yeoksam"]);
        let found = store.stations_by_ids(&[ids[1], StationId(99)]).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name.as_str(), "Yeoksam");
    }

    #[test]
    fn station_in_use_cannot_be_deleted() {
        let (store, ids) = store_with_stations(&["Gangnam", "Yeoksam", "Jamsil"]);
        store
            .create_line(draft("Line 2"), &[hop(ids[0], ids[1], 5)])
            .unwrap();

        assert_eq!(store.delete_station(ids[0]), Err(StoreError::StationInUse(ids[0])));
        assert_eq!(store.delete_station(ids[2]), Ok(()));
        assert_eq!(
            store.delete_station(ids[2]),
            Err(StoreError::StationNotFound(ids[2]))
        );
    }

    #[test]
    fn create_line_requires_known_stations() {
        let (store, ids) = store_with_stations(&["Gangnam"]);
        let err = store
            .create_line(draft("Line 2"), &[hop(ids[0], StationId(50), 5)])
            .unwrap_err();
        assert_eq!(err, StoreError::StationNotFound(StationId(50)));
        assert!(store.all_lines().unwrap().is_empty());
    }

    #[test]
    fn line_names_are_unique() {
        let (store, ids) = store_with_stations(&["Gangnam", "Yeoksam"]);
        let first = hop(ids[0], ids[1], 5);
        let (line, _) = store.create_line(draft("Line 2"), &[first]).unwrap();
        let (other, _) = store.create_line(draft("Line 3"), &[first]).unwrap();

        assert_eq!(
            store.create_line(draft("Line 2"), &[first]).unwrap_err(),
            StoreError::DuplicateLineName("Line 2".into())
        );
        // Renaming to its own name is fine, to another line's is not.
        assert!(store.update_line(line.id, draft("Line 2")).is_ok());
        assert_eq!(
            store.update_line(other.id, draft("Line 2")).unwrap_err(),
            StoreError::DuplicateLineName("Line 2".into())
        );
    }

    #[test]
    fn delete_line_drops_segments() {
        let (store, ids) = store_with_stations(&["Gangnam", "Yeoksam"]);
        let (line, _) = store
            .create_line(draft("Line 2"), &[hop(ids[0], ids[1], 5)])
            .unwrap();

        store.delete_line(line.id).unwrap();
        assert!(store.all_segments().unwrap().is_empty());
        assert_eq!(
            store.segments_for_line(line.id),
            Err(StoreError::LineNotFound(line.id))
        );
        assert_eq!(store.delete_line(line.id), Err(StoreError::LineNotFound(line.id)));
    }

    #[test]
    fn replace_keeps_ids_of_unchanged_segments() {
        let (store, ids) = store_with_stations(&["A", "B", "C"]);
        let (line, original) = store
            .create_line(draft("Line 1"), &[hop(ids[0], ids[1], 5)])
            .unwrap();

        let saved = store
            .replace_line_segments(
                line.id,
                &original,
                &[hop(ids[0], ids[1], 5), hop(ids[1], ids[2], 3)],
            )
            .unwrap();

        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].id, original[0].id);
        assert_ne!(saved[1].id, original[0].id);
        assert_eq!(store.segments_for_line(line.id).unwrap(), saved);
    }

    #[test]
    fn replace_detects_stale_snapshot() {
        let (store, ids) = store_with_stations(&["A", "B", "C"]);
        let (line, original) = store
            .create_line(draft("Line 1"), &[hop(ids[0], ids[1], 5)])
            .unwrap();
        store
            .replace_line_segments(
                line.id,
                &original,
                &[hop(ids[0], ids[1], 5), hop(ids[1], ids[2], 3)],
            )
            .unwrap();

        let err = store
            .replace_line_segments(line.id, &original, &[hop(ids[2], ids[0], 1)])
            .unwrap_err();
        assert_eq!(err, StoreError::Conflict(line.id));
        assert_eq!(store.segments_for_line(line.id).unwrap().len(), 2);
    }
}
