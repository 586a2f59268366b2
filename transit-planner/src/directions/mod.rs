//! Directions providers.
//!
//! A directions provider turns two coordinates and a travel mode into a
//! path and a travel time. The planner uses one to draw walking and riding
//! legs on the map and to time the walking legs of an expanded itinerary.
//!
//! Providers may fail (no network, no route, service error). Callers are
//! expected to recover with a straight-line estimate rather than surface
//! the error; `StraightLineDirections` is that estimate packaged as a
//! provider for offline use.

mod client;
mod error;
mod mock;
mod types;

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{GeoPoint, TravelMode};
use crate::walking::WalkingModel;

pub use client::{OsrmClient, OsrmConfig};
pub use error::DirectionsError;
pub use mock::MockDirections;
pub use types::{Geometry, OsrmRoute, RouteResponse};

/// A path between two points with its travel time.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEstimate {
    /// Ordered coordinates from origin to destination.
    pub path: Vec<GeoPoint>,
    pub duration: Duration,
}

/// Trait for looking up paths between coordinates.
#[allow(async_fn_in_trait)]
pub trait DirectionsProvider {
    /// Estimate the path and travel time from `from` to `to`.
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError>;

    async fn walking(&self, from: GeoPoint, to: GeoPoint) -> Result<PathEstimate, DirectionsError> {
        self.estimate(from, to, TravelMode::Walking).await
    }

    async fn driving(&self, from: GeoPoint, to: GeoPoint) -> Result<PathEstimate, DirectionsError> {
        self.estimate(from, to, TravelMode::Driving).await
    }
}

impl<P: DirectionsProvider> DirectionsProvider for &P {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        (**self).estimate(from, to, mode).await
    }
}

impl<P: DirectionsProvider> DirectionsProvider for Arc<P> {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        (**self).estimate(from, to, mode).await
    }
}

/// Offline provider: a straight two-point path timed at walking pace,
/// whatever the mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct StraightLineDirections {
    walking: WalkingModel,
}

impl StraightLineDirections {
    pub fn new(walking: WalkingModel) -> Self {
        Self { walking }
    }
}

impl DirectionsProvider for StraightLineDirections {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        _mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        let (path, duration) = self.walking.straight_line(&from, &to);
        Ok(PathEstimate { path, duration })
    }
}
