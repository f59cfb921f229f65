//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Segment, Station};
use crate::route::Route;
use crate::subway::LineDetail;

/// Request to create a station.
#[derive(Debug, Serialize, Deserialize)]
pub struct StationRequest {
    /// Display name, unique across the network
    pub name: String,
}

/// A station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationResponse {
    pub id: u64,
    pub name: String,
}

/// Request to create a line with its first segment.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRequest {
    pub name: String,

    /// Display colour, e.g. "bg-red-600"
    pub color: String,

    pub up_station_id: u64,
    pub down_station_id: u64,

    /// Distance of the first segment
    pub distance: i64,

    /// Surcharge for riding this line (defaults to 0)
    #[serde(default)]
    pub extra_fare: u64,
}

/// Request to change a line's attributes.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineUpdateRequest {
    pub name: String,
    pub color: String,

    #[serde(default)]
    pub extra_fare: u64,
}

/// A line with its stations in path order.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineResponse {
    pub id: u64,
    pub name: String,
    pub color: String,
    pub extra_fare: u64,

    /// Length of the whole line
    pub distance: u64,

    /// Stations from the up terminal to the down terminal
    pub stations: Vec<StationResponse>,
}

/// Request to add a segment to a line.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: i64,
}

/// Query selecting the station to detach from a line.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDeleteQuery {
    pub station_id: u64,
}

/// A stored segment.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: u64,
    pub up_station_id: u64,
    pub down_station_id: u64,
    pub distance: u32,
}

/// Segments of a line after a mutation, in path order.
#[derive(Debug, Serialize, Deserialize)]
pub struct SectionsResponse {
    pub sections: Vec<SectionResponse>,
}

/// Route query parameters.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub source: u64,
    pub target: u64,

    /// Rider age, for discounted fares
    pub age: Option<u32>,
}

/// A priced route.
#[derive(Debug, Serialize, Deserialize)]
pub struct PathResponse {
    /// Stations in travel order
    pub stations: Vec<StationResponse>,

    /// Total distance travelled
    pub distance: u64,

    /// Fare payable
    pub fare: u64,
}

/// Every line in the network.
#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkResponse {
    pub lines: Vec<LineResponse>,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl StationResponse {
    /// Create from a domain Station.
    pub fn from_station(station: &Station) -> Self {
        Self {
            id: station.id.0,
            name: station.name.to_string(),
        }
    }
}

impl LineResponse {
    /// Create from a resolved line.
    pub fn from_detail(detail: &LineDetail) -> Self {
        Self {
            id: detail.line.id.0,
            name: detail.line.name().to_string(),
            color: detail.line.color().to_string(),
            extra_fare: detail.line.extra_fare(),
            distance: detail.distance,
            stations: detail
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
        }
    }
}

impl SectionsResponse {
    /// Create from a line's segments.
    pub fn from_segments(segments: &[Segment]) -> Self {
        Self {
            sections: segments
                .iter()
                .map(|s| SectionResponse {
                    id: s.id.0,
                    up_station_id: s.up_station_id.0,
                    down_station_id: s.down_station_id.0,
                    distance: s.distance.get(),
                })
                .collect(),
        }
    }
}

impl PathResponse {
    /// Create from a route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            stations: route
                .stations
                .iter()
                .map(StationResponse::from_station)
                .collect(),
            distance: route.distance,
            fare: route.fare,
        }
    }
}
