//! Domain error types.
//!
//! These errors represent validation failures in the static network data and
//! in the values built from it. Empty search results are not errors.

use super::{InvalidColor, InvalidCoordinate, InvalidStopId, RouteId, StopId};

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A route lists a stop id that the network does not define
    #[error("route {route} references unknown stop {stop}")]
    InvalidStopReference { route: RouteId, stop: StopId },

    /// A route holds a stop that differs from the network's stop of that id
    #[error("route {route} holds a stop {stop} that differs from the network's")]
    MismatchedStop { route: RouteId, stop: StopId },

    /// A route has no stops
    #[error("route {0} has no stops")]
    EmptyRoute(RouteId),

    /// Two stops share an id
    #[error("duplicate stop id {0}")]
    DuplicateStop(StopId),

    /// Two routes share an id
    #[error("duplicate route id {0}")]
    DuplicateRoute(RouteId),

    /// Invalid itinerary construction (e.g., alight before board)
    #[error("invalid itinerary: {0}")]
    InvalidItinerary(&'static str),
}

/// Errors from loading a network data file.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The file could not be read
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid network JSON
    #[error("failed to parse network data: {0}")]
    Json(#[from] serde_json::Error),

    /// A stop coordinate is out of range
    #[error(transparent)]
    InvalidCoordinate(#[from] InvalidCoordinate),

    /// A stop id is malformed
    #[error(transparent)]
    InvalidStopId(#[from] InvalidStopId),

    /// A route colour is malformed
    #[error(transparent)]
    InvalidColor(#[from] InvalidColor),

    /// The data is well-formed but inconsistent
    #[error(transparent)]
    Domain(#[from] DomainError),
}
