//! Segment types: one directed hop between two stations on a line.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainError, StationId};

/// Identifier of a line, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(pub u64);

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a persisted segment, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u64);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strictly positive segment length.
///
/// # Examples
///
/// ```
/// use subway_server::domain::Distance;
///
/// let d = Distance::new(10).unwrap();
/// assert_eq!(d.get(), 10);
///
/// assert!(Distance::new(0).is_err());
/// assert!(Distance::new(-5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Distance(u32);

impl Distance {
    /// Validate a raw distance.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::NonPositiveDistance(value));
        }
        u32::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::DistanceTooLarge(value))
    }

    /// Returns the distance as a plain integer.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Sum of two distances, or `None` on overflow.
    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Remaining distance after removing `other`.
    ///
    /// Returns `None` unless `other` is strictly shorter than `self`,
    /// since a zero-length remainder is not a valid distance.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        match self.0.checked_sub(other.0) {
            Some(0) | None => None,
            Some(rest) => Some(Self(rest)),
        }
    }
}

impl TryFrom<i64> for Distance {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Distance> for i64 {
    fn from(d: Distance) -> Self {
        i64::from(d.0)
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An unpersisted directed hop: `up -> down` with a positive distance.
///
/// This is the unit the topology engine reasons about. It carries no
/// identity; the store assigns segment ids when hops are saved.
///
/// # Invariants
///
/// - `up != down`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hop {
    up: StationId,
    down: StationId,
    distance: Distance,
}

impl Hop {
    /// Construct a hop, rejecting self-loops.
    pub fn new(up: StationId, down: StationId, distance: Distance) -> Result<Self, DomainError> {
        if up == down {
            return Err(DomainError::LoopSegment(up));
        }
        Ok(Self { up, down, distance })
    }

    /// Construct a hop whose endpoints the caller already knows differ.
    pub(crate) fn from_parts(up: StationId, down: StationId, distance: Distance) -> Self {
        debug_assert_ne!(up, down, "hop endpoints must differ");
        Self { up, down, distance }
    }

    /// Up-station (where the hop starts).
    pub fn up(&self) -> StationId {
        self.up
    }

    /// Down-station (where the hop ends).
    pub fn down(&self) -> StationId {
        self.down
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Whether `station` is either endpoint of this hop.
    pub fn touches(&self, station: StationId) -> bool {
        self.up == station || self.down == station
    }
}

/// A persisted segment belonging to exactly one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub id: SegmentId,
    pub line_id: LineId,
    pub up_station_id: StationId,
    pub down_station_id: StationId,
    pub distance: Distance,
}

impl Segment {
    /// The hop this segment stores.
    ///
    /// Fails only for records that bypassed validation, such as a
    /// hand-edited snapshot containing a self-loop.
    pub fn hop(&self) -> Result<Hop, DomainError> {
        Hop::new(self.up_station_id, self.down_station_id, self.distance)
    }

    /// Whether this segment stores exactly `hop`.
    pub fn matches(&self, hop: &Hop) -> bool {
        self.up_station_id == hop.up
            && self.down_station_id == hop.down
            && self.distance == hop.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(v: i64) -> Distance {
        Distance::new(v).unwrap()
    }

    #[test]
    fn distance_rejects_non_positive() {
        assert_eq!(Distance::new(0), Err(DomainError::NonPositiveDistance(0)));
        assert_eq!(Distance::new(-1), Err(DomainError::NonPositiveDistance(-1)));
    }

    #[test]
    fn distance_rejects_overflow() {
        let too_big = i64::from(u32::MAX) + 1;
        assert_eq!(
            Distance::new(too_big),
            Err(DomainError::DistanceTooLarge(too_big))
        );
    }

    #[test]
    fn checked_sub_requires_strictly_shorter() {
        assert_eq!(d(10).checked_sub(d(3)), Some(d(7)));
        assert_eq!(d(10).checked_sub(d(10)), None);
        assert_eq!(d(10).checked_sub(d(11)), None);
    }

    #[test]
    fn checked_add_sums() {
        assert_eq!(d(4).checked_add(d(5)), Some(d(9)));
        assert_eq!(Distance(u32::MAX).checked_add(d(1)), None);
    }

    #[test]
    fn hop_rejects_loop() {
        let err = Hop::new(StationId(1), StationId(1), d(3)).unwrap_err();
        assert_eq!(err, DomainError::LoopSegment(StationId(1)));
    }

    #[test]
    fn hop_touches_both_ends() {
        let hop = Hop::new(StationId(1), StationId(2), d(3)).unwrap();
        assert!(hop.touches(StationId(1)));
        assert!(hop.touches(StationId(2)));
        assert!(!hop.touches(StationId(3)));
    }

    #[test]
    fn segment_matches_hop() {
        let segment = Segment {
            id: SegmentId(9),
            line_id: LineId(1),
            up_station_id: StationId(1),
            down_station_id: StationId(2),
            distance: d(5),
        };
        let same = Hop::new(StationId(1), StationId(2), d(5)).unwrap();
        let longer = Hop::new(StationId(1), StationId(2), d(6)).unwrap();
        assert!(segment.matches(&same));
        assert!(!segment.matches(&longer));
        assert_eq!(segment.hop().unwrap(), same);
    }

    #[test]
    fn distance_serde_validates() {
        assert_eq!(serde_json::from_str::<Distance>("7").unwrap(), d(7));
        assert!(serde_json::from_str::<Distance>("0").is_err());
        assert_eq!(serde_json::to_string(&d(7)).unwrap(), "7");
    }
}
