//! Mock directions provider for testing without a route service.
//!
//! Returns canned travel times per mode (or fails for modes without one)
//! and records every request so tests can check call order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Duration;

use crate::domain::{GeoPoint, TravelMode};

use super::error::DirectionsError;
use super::{DirectionsProvider, PathEstimate};

/// A recorded request.
pub type MockCall = (TravelMode, GeoPoint, GeoPoint);

/// Mock provider with fixed per-mode durations.
///
/// Successful paths have three points (origin, midpoint, destination) so
/// they can be told apart from a two-point straight-line fallback.
#[derive(Debug, Clone, Default)]
pub struct MockDirections {
    durations: HashMap<TravelMode, Duration>,
    delays: HashMap<TravelMode, std::time::Duration>,
    calls: Arc<Mutex<Vec<MockCall>>>,
}

impl MockDirections {
    /// A provider that fails every request.
    pub fn failing() -> Self {
        Self::default()
    }

    /// A provider that answers both modes with the given durations.
    pub fn new(walking: Duration, driving: Duration) -> Self {
        Self::default()
            .with_duration(TravelMode::Walking, walking)
            .with_duration(TravelMode::Driving, driving)
    }

    /// Answer `mode` with a fixed duration.
    pub fn with_duration(mut self, mode: TravelMode, duration: Duration) -> Self {
        self.durations.insert(mode, duration);
        self
    }

    /// Sleep before answering `mode`.
    pub fn with_delay(mut self, mode: TravelMode, delay: std::time::Duration) -> Self {
        self.delays.insert(mode, delay);
        self
    }

    /// Requests made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

impl DirectionsProvider for MockDirections {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((mode, from, to));
        }

        if let Some(delay) = self.delays.get(&mode) {
            tokio::time::sleep(*delay).await;
        }

        let duration = self
            .durations
            .get(&mode)
            .copied()
            .ok_or_else(|| DirectionsError::NotConfigured(format!("no mock {mode:?} path")))?;

        let mid = GeoPoint::new((from.lat + to.lat) / 2.0, (from.lon + to.lon) / 2.0);
        Ok(PathEstimate {
            path: vec![from, mid, to],
            duration,
        })
    }
}
