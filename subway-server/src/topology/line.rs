//! Ordered segment path of one line.

use std::collections::{HashMap, HashSet};

use crate::domain::{Distance, Hop, Segment, StationId};

use super::TopologyError;

/// The segments of one line, ordered from the up terminal to the down terminal.
///
/// # Invariants
///
/// - Consecutive hops connect: `hops[i].down() == hops[i + 1].up()`
/// - No station appears twice on the path (no cycles, no branches)
///
/// A topology may be empty (a line waiting for its first segment).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineTopology {
    hops: Vec<Hop>,
}

impl LineTopology {
    /// A line with no segments yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Order an unordered set of hops into a path, checking the invariant.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::NotAPath`] if a station starts or ends two
    /// hops, if the hops form a cycle, or if they split into several pieces.
    pub fn from_hops(hops: impl IntoIterator<Item = Hop>) -> Result<Self, TopologyError> {
        let mut by_up: HashMap<StationId, Hop> = HashMap::new();
        let mut downs: HashSet<StationId> = HashSet::new();

        for hop in hops {
            if by_up.insert(hop.up(), hop).is_some() {
                return Err(TopologyError::NotAPath("a station starts two segments"));
            }
            if !downs.insert(hop.down()) {
                return Err(TopologyError::NotAPath("a station ends two segments"));
            }
        }

        if by_up.is_empty() {
            return Ok(Self::empty());
        }

        let mut starts = by_up.keys().filter(|s| !downs.contains(s));
        let start = match (starts.next(), starts.next()) {
            (Some(start), None) => *start,
            (None, _) => return Err(TopologyError::NotAPath("segments form a cycle")),
            (Some(_), Some(_)) => {
                return Err(TopologyError::NotAPath("segments are not connected"));
            }
        };

        let mut ordered = Vec::with_capacity(by_up.len());
        let mut current = start;
        while let Some(hop) = by_up.get(&current) {
            ordered.push(*hop);
            current = hop.down();
        }

        // Unique ups and downs plus a single start mean any leftover hop sits on a
        // detached cycle.
        if ordered.len() != by_up.len() {
            return Err(TopologyError::NotAPath("segments are not connected"));
        }

        Ok(Self { hops: ordered })
    }

    /// Build the topology of stored segments.
    pub fn from_segments(segments: &[Segment]) -> Result<Self, TopologyError> {
        let hops = segments
            .iter()
            .map(|s| {
                s.hop()
                    .map_err(|_| TopologyError::NotAPath("a segment connects a station to itself"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_hops(hops)
    }

    /// Hops in path order.
    pub fn hops(&self) -> &[Hop] {
        &self.hops
    }

    pub fn into_hops(self) -> Vec<Hop> {
        self.hops
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    /// Station ids from the up terminal to the down terminal.
    pub fn stations(&self) -> Vec<StationId> {
        let Some(first) = self.hops.first() else {
            return Vec::new();
        };
        std::iter::once(first.up())
            .chain(self.hops.iter().map(Hop::down))
            .collect()
    }

    /// Whether `station` lies anywhere on the line.
    pub fn contains(&self, station: StationId) -> bool {
        self.hops.iter().any(|h| h.touches(station))
    }

    pub fn up_terminal(&self) -> Option<StationId> {
        self.hops.first().map(Hop::up)
    }

    pub fn down_terminal(&self) -> Option<StationId> {
        self.hops.last().map(Hop::down)
    }

    /// Sum of all hop distances along the line.
    pub fn total_distance(&self) -> u64 {
        self.hops.iter().map(|h| u64::from(h.distance().get())).sum()
    }

    /// Attach a new hop to the line.
    ///
    /// The first hop of an empty line is always accepted. Afterwards exactly
    /// one endpoint must already be on the line: the hop then either extends
    /// a terminal or splits the existing hop that shares its known endpoint,
    /// in which case it must be strictly shorter than that hop.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::DuplicateConnection`] if both endpoints are on the line
    /// - [`TopologyError::Disconnected`] if neither endpoint is on the line
    /// - [`TopologyError::InvalidSplitDistance`] if a split is not strictly shorter
    pub fn insert(&self, hop: Hop) -> Result<Self, TopologyError> {
        if self.hops.is_empty() {
            return Ok(Self { hops: vec![hop] });
        }

        match (self.contains(hop.up()), self.contains(hop.down())) {
            (true, true) => Err(TopologyError::DuplicateConnection {
                up: hop.up(),
                down: hop.down(),
            }),
            (false, false) => Err(TopologyError::Disconnected {
                up: hop.up(),
                down: hop.down(),
            }),
            (true, false) => self.attach_downstream(hop),
            (false, true) => self.attach_upstream(hop),
        }
    }

    /// `hop.up()` is on the line and `hop.down()` is new.
    fn attach_downstream(&self, hop: Hop) -> Result<Self, TopologyError> {
        let mut hops = self.hops.clone();

        match hops.iter().position(|h| h.up() == hop.up()) {
            // Only the down terminal starts no hop.
            None => hops.push(hop),
            Some(i) => {
                let existing = hops[i];
                let rest = split_remainder(&existing, &hop)?;
                let tail = Hop::from_parts(hop.down(), existing.down(), rest);
                hops[i] = hop;
                hops.insert(i + 1, tail);
            }
        }

        Ok(Self { hops })
    }

    /// `hop.down()` is on the line and `hop.up()` is new.
    fn attach_upstream(&self, hop: Hop) -> Result<Self, TopologyError> {
        let mut hops = self.hops.clone();

        match hops.iter().position(|h| h.down() == hop.down()) {
            // Only the up terminal ends no hop.
            None => hops.insert(0, hop),
            Some(i) => {
                let existing = hops[i];
                let rest = split_remainder(&existing, &hop)?;
                let head = Hop::from_parts(existing.up(), hop.up(), rest);
                hops[i] = head;
                hops.insert(i + 1, hop);
            }
        }

        Ok(Self { hops })
    }

    /// Detach `station` from the line.
    ///
    /// A terminal station takes its single hop with it. An interior station
    /// is bridged: the hops on either side merge into one whose distance is
    /// their sum.
    ///
    /// # Errors
    ///
    /// - [`TopologyError::MinimumTopology`] if the line has one hop or fewer
    /// - [`TopologyError::StationNotOnLine`] if `station` is not on the line
    pub fn remove(&self, station: StationId) -> Result<Self, TopologyError> {
        if self.hops.len() <= 1 {
            return Err(TopologyError::MinimumTopology);
        }
        if !self.contains(station) {
            return Err(TopologyError::StationNotOnLine(station));
        }

        let mut hops = self.hops.clone();

        if self.up_terminal() == Some(station) {
            hops.remove(0);
        } else if self.down_terminal() == Some(station) {
            hops.pop();
        } else {
            let Some(i) = hops.iter().position(|h| h.down() == station) else {
                return Err(TopologyError::StationNotOnLine(station));
            };
            let (above, below) = (hops[i], hops[i + 1]);
            let merged = above
                .distance()
                .checked_add(below.distance())
                .ok_or(TopologyError::DistanceOverflow)?;
            hops[i] = Hop::from_parts(above.up(), below.down(), merged);
            hops.remove(i + 1);
        }

        Ok(Self { hops })
    }
}

/// Distance left over when `new` subdivides `existing`.
fn split_remainder(existing: &Hop, new: &Hop) -> Result<Distance, TopologyError> {
    existing
        .distance()
        .checked_sub(new.distance())
        .ok_or(TopologyError::InvalidSplitDistance {
            existing: existing.distance(),
            requested: new.distance(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, SegmentId};

    fn s(id: u64) -> StationId {
        StationId(id)
    }

    fn hop(up: u64, down: u64, distance: i64) -> Hop {
        Hop::new(s(up), s(down), Distance::new(distance).unwrap()).unwrap()
    }

    /// Line 1 -> 2 -> 3 with distances 10 and 6.
    fn three_stations() -> LineTopology {
        LineTopology::from_hops([hop(1, 2, 10), hop(2, 3, 6)]).unwrap()
    }

    fn summary(t: &LineTopology) -> Vec<(u64, u64, u32)> {
        t.hops()
            .iter()
            .map(|h| (h.up().0, h.down().0, h.distance().get()))
            .collect()
    }

    #[test]
    fn from_hops_orders_shuffled_input() {
        let t = LineTopology::from_hops([hop(3, 4, 1), hop(1, 2, 1), hop(2, 3, 1)]).unwrap();
        assert_eq!(t.stations(), vec![s(1), s(2), s(3), s(4)]);
        assert_eq!(t.up_terminal(), Some(s(1)));
        assert_eq!(t.down_terminal(), Some(s(4)));
    }

    #[test]
    fn from_hops_rejects_branch() {
        let err = LineTopology::from_hops([hop(1, 2, 1), hop(1, 3, 1)]).unwrap_err();
        assert_eq!(err, TopologyError::NotAPath("a station starts two segments"));

        let err = LineTopology::from_hops([hop(1, 3, 1), hop(2, 3, 1)]).unwrap_err();
        assert_eq!(err, TopologyError::NotAPath("a station ends two segments"));
    }

    #[test]
    fn from_hops_rejects_cycle() {
        let err = LineTopology::from_hops([hop(1, 2, 1), hop(2, 1, 1)]).unwrap_err();
        assert_eq!(err, TopologyError::NotAPath("segments form a cycle"));
    }

    #[test]
    fn from_hops_rejects_detached_cycle() {
        let err =
            LineTopology::from_hops([hop(1, 2, 1), hop(3, 4, 1), hop(4, 3, 1)]).unwrap_err();
        assert_eq!(err, TopologyError::NotAPath("segments are not connected"));
    }

    #[test]
    fn from_hops_rejects_two_pieces() {
        let err = LineTopology::from_hops([hop(1, 2, 1), hop(3, 4, 1)]).unwrap_err();
        assert_eq!(err, TopologyError::NotAPath("segments are not connected"));
    }

    #[test]
    fn from_segments_rejects_self_loop() {
        let segment = Segment {
            id: SegmentId(1),
            line_id: LineId(1),
            up_station_id: s(5),
            down_station_id: s(5),
            distance: Distance::new(3).unwrap(),
        };
        assert!(matches!(
            LineTopology::from_segments(&[segment]),
            Err(TopologyError::NotAPath(_))
        ));
    }

    #[test]
    fn empty_line_accepts_any_first_hop() {
        let t = LineTopology::empty().insert(hop(7, 8, 4)).unwrap();
        assert_eq!(summary(&t), vec![(7, 8, 4)]);
    }

    #[test]
    fn extend_down_terminal() {
        let t = three_stations().insert(hop(3, 4, 2)).unwrap();
        assert_eq!(summary(&t), vec![(1, 2, 10), (2, 3, 6), (3, 4, 2)]);
    }

    #[test]
    fn extend_up_terminal() {
        let t = three_stations().insert(hop(0, 1, 2)).unwrap();
        assert_eq!(summary(&t), vec![(0, 1, 2), (1, 2, 10), (2, 3, 6)]);
    }

    #[test]
    fn split_from_up_side() {
        let t = three_stations().insert(hop(1, 9, 4)).unwrap();
        assert_eq!(summary(&t), vec![(1, 9, 4), (9, 2, 6), (2, 3, 6)]);
        assert_eq!(t.total_distance(), 16);
    }

    #[test]
    fn split_from_down_side() {
        let t = three_stations().insert(hop(9, 3, 2)).unwrap();
        assert_eq!(summary(&t), vec![(1, 2, 10), (2, 9, 4), (9, 3, 2)]);
        assert_eq!(t.total_distance(), 16);
    }

    #[test]
    fn split_must_be_strictly_shorter() {
        let err = three_stations().insert(hop(2, 9, 6)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::InvalidSplitDistance {
                existing: Distance::new(6).unwrap(),
                requested: Distance::new(6).unwrap(),
            }
        );
        assert!(three_stations().insert(hop(9, 2, 11)).is_err());
    }

    #[test]
    fn reject_duplicate_connection() {
        let err = three_stations().insert(hop(1, 3, 1)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::DuplicateConnection {
                up: s(1),
                down: s(3)
            }
        );
        // Reversed existing hop is also a duplicate.
        assert!(three_stations().insert(hop(2, 1, 1)).is_err());
    }

    #[test]
    fn reject_disconnected() {
        let err = three_stations().insert(hop(5, 6, 1)).unwrap_err();
        assert_eq!(
            err,
            TopologyError::Disconnected {
                up: s(5),
                down: s(6)
            }
        );
    }

    #[test]
    fn remove_up_terminal() {
        let t = three_stations().remove(s(1)).unwrap();
        assert_eq!(summary(&t), vec![(2, 3, 6)]);
    }

    #[test]
    fn remove_down_terminal() {
        let t = three_stations().remove(s(3)).unwrap();
        assert_eq!(summary(&t), vec![(1, 2, 10)]);
    }

    #[test]
    fn remove_interior_merges() {
        let t = three_stations().remove(s(2)).unwrap();
        assert_eq!(summary(&t), vec![(1, 3, 16)]);
    }

    #[test]
    fn remove_rejects_single_segment_line() {
        let t = LineTopology::from_hops([hop(1, 2, 4)]).unwrap();
        assert_eq!(t.remove(s(1)), Err(TopologyError::MinimumTopology));
        assert_eq!(t.remove(s(2)), Err(TopologyError::MinimumTopology));
    }

    #[test]
    fn remove_rejects_unknown_station() {
        assert_eq!(
            three_stations().remove(s(42)),
            Err(TopologyError::StationNotOnLine(s(42)))
        );
    }

    #[test]
    fn operations_do_not_mutate_input() {
        let original = three_stations();
        let _ = original.insert(hop(1, 9, 4)).unwrap();
        let _ = original.remove(s(2)).unwrap();
        assert_eq!(original, three_stations());
    }
}
