//! Route query error types.

use crate::domain::StationId;
use crate::store::StoreError;

use super::{FareError, MissingStation};

/// Errors from a route query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// Source and target are the same station
    #[error("source and target are both station {0}")]
    SameStation(StationId),

    /// Station is not served by any segment, or has no record
    #[error("station {0} is not in the network")]
    StationNotFound(StationId),

    /// Both stations exist but no chain of segments joins them
    #[error("no path from station {from} to station {to}")]
    NoPath { from: StationId, to: StationId },

    /// Fare calculation rejected the distance
    #[error(transparent)]
    Fare(#[from] FareError),

    /// Loading network data failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<MissingStation> for RouteError {
    fn from(e: MissingStation) -> Self {
        RouteError::StationNotFound(e.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = RouteError::SameStation(StationId(1));
        assert_eq!(err.to_string(), "source and target are both station 1");

        let err = RouteError::NoPath {
            from: StationId(1),
            to: StationId(4),
        };
        assert_eq!(err.to_string(), "no path from station 1 to station 4");

        let err = RouteError::from(MissingStation(StationId(3)));
        assert_eq!(err, RouteError::StationNotFound(StationId(3)));
    }
}
