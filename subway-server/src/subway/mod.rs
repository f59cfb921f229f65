//! Subway operations over a store.
//!
//! [`SubwayService`] is what a request layer talks to. Each call reads a
//! fresh snapshot from the store, runs the pure topology or route engine on
//! it, and writes back at most once. A failed call writes nothing.

mod error;

pub use error::SubwayError;

use tracing::{debug, info};

use crate::domain::{
    Distance, Hop, Line, LineDraft, LineId, Segment, Station, StationId, StationName,
};
use crate::route::{FareCalculator, Route, RouteService, order_stations};
use crate::store::{StoreError, SubwayStore};
use crate::topology::LineTopology;

/// A line with its stations resolved in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDetail {
    pub line: Line,

    /// Stations from the up terminal to the down terminal.
    pub stations: Vec<Station>,

    /// Length of the whole line.
    pub distance: u64,
}

/// Entry point for station, line, segment and route operations.
pub struct SubwayService<S: SubwayStore> {
    store: S,
    fares: FareCalculator,
}

impl<S: SubwayStore> SubwayService<S> {
    pub fn new(store: S, fares: FareCalculator) -> Self {
        Self { store, fares }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn fares(&self) -> &FareCalculator {
        &self.fares
    }

    pub fn create_station(&self, name: &str) -> Result<Station, SubwayError> {
        let name = StationName::parse(name)?;
        let station = self.store.create_station(name)?;
        info!(station = %station.id, name = %station.name, "station created");
        Ok(station)
    }

    pub fn stations(&self) -> Result<Vec<Station>, SubwayError> {
        Ok(self.store.all_stations()?)
    }

    pub fn delete_station(&self, id: StationId) -> Result<(), SubwayError> {
        self.store.delete_station(id)?;
        info!(station = %id, "station deleted");
        Ok(())
    }

    /// Create a line whose first segment runs `up -> down`.
    pub fn create_line(
        &self,
        draft: LineDraft,
        up: StationId,
        down: StationId,
        distance: Distance,
    ) -> Result<LineDetail, SubwayError> {
        self.require_stations(&[up, down])?;
        let hop = Hop::new(up, down, distance)?;
        let topology = LineTopology::empty().insert(hop)?;

        let (line, segments) = self.store.create_line(draft, topology.hops())?;
        info!(line = %line.id, name = %line.name(), "line created");
        self.detail(line, &segments)
    }

    pub fn lines(&self) -> Result<Vec<LineDetail>, SubwayError> {
        let lines = self.store.all_lines()?;
        lines
            .into_iter()
            .map(|line| {
                let segments = self.store.segments_for_line(line.id)?;
                self.detail(line, &segments)
            })
            .collect()
    }

    pub fn line(&self, id: LineId) -> Result<LineDetail, SubwayError> {
        let line = self.store.line(id)?;
        let segments = self.store.segments_for_line(id)?;
        self.detail(line, &segments)
    }

    pub fn update_line(&self, id: LineId, draft: LineDraft) -> Result<Line, SubwayError> {
        let line = self.store.update_line(id, draft)?;
        info!(line = %id, name = %line.name(), "line updated");
        Ok(line)
    }

    pub fn delete_line(&self, id: LineId) -> Result<(), SubwayError> {
        self.store.delete_line(id)?;
        info!(line = %id, "line deleted");
        Ok(())
    }

    /// Attach a segment `up -> down` to a line.
    ///
    /// Returns the line's segments in path order after the insertion.
    pub fn insert_segment(
        &self,
        line: LineId,
        up: StationId,
        down: StationId,
        distance: Distance,
    ) -> Result<Vec<Segment>, SubwayError> {
        let current = self.store.segments_for_line(line)?;
        self.require_stations(&[up, down])?;
        let hop = Hop::new(up, down, distance)?;

        let topology = LineTopology::from_segments(&current)?.insert(hop)?;
        let saved = self
            .store
            .replace_line_segments(line, &current, topology.hops())?;

        info!(line = %line, %up, %down, %distance, segments = saved.len(), "segment inserted");
        Ok(saved)
    }

    /// Detach `station` from a line.
    ///
    /// Returns the line's segments in path order after the removal.
    pub fn remove_segment(
        &self,
        line: LineId,
        station: StationId,
    ) -> Result<Vec<Segment>, SubwayError> {
        let current = self.store.segments_for_line(line)?;
        let topology = LineTopology::from_segments(&current)?.remove(station)?;
        let saved = self
            .store
            .replace_line_segments(line, &current, topology.hops())?;

        info!(line = %line, %station, segments = saved.len(), "segment removed");
        Ok(saved)
    }

    /// Shortest route between two stations, priced for `age` if given.
    pub fn find_route(
        &self,
        source: StationId,
        target: StationId,
        age: Option<u32>,
    ) -> Result<Route, SubwayError> {
        let route = RouteService::new(&self.store, &self.fares).find_route_for(source, target, age)?;
        Ok(route)
    }

    fn require_stations(&self, ids: &[StationId]) -> Result<(), SubwayError> {
        let found = self.store.stations_by_ids(ids)?;
        match ids.iter().find(|id| !found.iter().any(|s| s.id == **id)) {
            Some(missing) => Err(StoreError::StationNotFound(*missing).into()),
            None => Ok(()),
        }
    }

    fn detail(&self, line: Line, segments: &[Segment]) -> Result<LineDetail, SubwayError> {
        let topology = LineTopology::from_segments(segments)?;
        let path = topology.stations();
        let records = self.store.stations_by_ids(&path)?;
        let stations = order_stations(&path, records)?;
        debug!(line = %line.id, stations = stations.len(), "line resolved");

        Ok(LineDetail {
            line,
            stations,
            distance: topology.total_distance(),
        })
    }
}
