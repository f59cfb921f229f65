//! Resolve a path of station ids to station records in path order.

use std::collections::HashMap;

use crate::domain::{Station, StationId};

/// A station id on the path had no matching record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("station {0} has no record")]
pub struct MissingStation(pub StationId);

/// Sort `stations` into the order given by `path`.
///
/// Records not named by `path` are dropped.
///
/// # Examples
///
/// ```
/// use subway_server::domain::{Station, StationId, StationName};
/// use subway_server::route::order_stations;
///
/// let a = Station::new(StationId(1), StationName::parse("A").unwrap());
/// let b = Station::new(StationId(2), StationName::parse("B").unwrap());
///
/// let ordered = order_stations(&[StationId(2), StationId(1)], vec![a, b]).unwrap();
/// assert_eq!(ordered[0].name.as_str(), "B");
/// assert_eq!(ordered[1].name.as_str(), "A");
/// ```
pub fn order_stations(
    path: &[StationId],
    stations: impl IntoIterator<Item = Station>,
) -> Result<Vec<Station>, MissingStation> {
    let by_id: HashMap<StationId, Station> = stations.into_iter().map(|s| (s.id, s)).collect();

    path.iter()
        .map(|id| by_id.get(id).cloned().ok_or(MissingStation(*id)))
        .collect()
}
