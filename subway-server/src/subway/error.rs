//! Errors surfaced by [`SubwayService`](super::SubwayService).

use crate::domain::{DomainError, InvalidName};
use crate::route::{MissingStation, RouteError};
use crate::store::StoreError;
use crate::topology::TopologyError;

/// Any failure of a subway operation.
///
/// Collaborator errors are carried through unchanged so callers can map
/// each kind to their own response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubwayError {
    /// Raw input failed validation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A line mutation would break its path
    #[error(transparent)]
    Topology(#[from] TopologyError),

    /// A route query failed
    #[error(transparent)]
    Route(#[from] RouteError),

    /// Storage rejected or failed the operation
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<InvalidName> for SubwayError {
    fn from(e: InvalidName) -> Self {
        SubwayError::Domain(e.into())
    }
}

impl From<MissingStation> for SubwayError {
    fn from(e: MissingStation) -> Self {
        SubwayError::Store(StoreError::StationNotFound(e.0))
    }
}
