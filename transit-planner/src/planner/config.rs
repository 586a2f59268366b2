//! Search configuration for the itinerary planner.

use chrono::Duration;
use serde::Deserialize;
use thiserror::Error;

use crate::proximity::DEFAULT_MAX_DISTANCE_M;
use crate::walking::{DEFAULT_WALK_SPEED_M_PER_MIN, WalkingModel};

/// Largest accepted per-stop riding time (minutes).
pub const MAX_RIDE_MINS_PER_STOP: i64 = 60;

/// Error returned when a configuration value is out of range.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("max_walk_distance_m must be finite and non-negative, got {0}")]
    WalkDistance(f64),

    #[error("walk_speed_m_per_min must be finite and positive, got {0}")]
    WalkSpeed(f64),

    #[error("ride_mins_per_stop must be within 0..=60, got {0}")]
    RidePerStop(i64),

    #[error("failed to parse planner config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration parameters for itinerary search.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Radius around start and end searched for stops (metres).
    pub max_walk_distance_m: f64,

    /// Walking pace (metres per minute).
    pub walk_speed_m_per_min: f64,

    /// Flat riding time charged per stop travelled (minutes).
    pub ride_mins_per_stop: i64,

    /// Keep itineraries that board and alight at the same stop.
    pub keep_same_stop_rides: bool,

    /// Maximum number of itineraries to return (`None` for all).
    pub max_results: Option<usize>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any value is out of range (see [`Self::validate`]).
    pub fn new(
        max_walk_distance_m: f64,
        walk_speed_m_per_min: f64,
        ride_mins_per_stop: i64,
        keep_same_stop_rides: bool,
        max_results: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            max_walk_distance_m,
            walk_speed_m_per_min,
            ride_mins_per_stop,
            keep_same_stop_rides,
            max_results,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a configuration from JSON, filling missing fields with
    /// defaults, and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_walk_distance_m.is_finite() || self.max_walk_distance_m < 0.0 {
            return Err(ConfigError::WalkDistance(self.max_walk_distance_m));
        }
        if !self.walk_speed_m_per_min.is_finite() || self.walk_speed_m_per_min <= 0.0 {
            return Err(ConfigError::WalkSpeed(self.walk_speed_m_per_min));
        }
        if !(0..=MAX_RIDE_MINS_PER_STOP).contains(&self.ride_mins_per_stop) {
            return Err(ConfigError::RidePerStop(self.ride_mins_per_stop));
        }
        Ok(())
    }

    /// Returns the per-stop riding time as a Duration, or `None` if the
    /// configured value is out of range.
    pub fn ride_per_stop(&self) -> Option<Duration> {
        if !(0..=MAX_RIDE_MINS_PER_STOP).contains(&self.ride_mins_per_stop) {
            return None;
        }
        Duration::try_minutes(self.ride_mins_per_stop)
    }

    /// Riding time for a number of stops, or `None` on overflow or an
    /// out-of-range per-stop time.
    pub fn ride_time(&self, stop_count: usize) -> Option<Duration> {
        let stops = i32::try_from(stop_count).ok()?;
        self.ride_per_stop()?.checked_mul(stops)
    }

    /// The walking model for the configured pace.
    pub fn walking(&self) -> WalkingModel {
        WalkingModel::new(self.walk_speed_m_per_min)
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_walk_distance_m: DEFAULT_MAX_DISTANCE_M,
            walk_speed_m_per_min: DEFAULT_WALK_SPEED_M_PER_MIN,
            ride_mins_per_stop: 3,
            keep_same_stop_rides: true,
            max_results: None,
        }
    }
}
