//! Straight-line walking estimates.
//!
//! Walking time is estimated from great-circle distance at a constant pace.
//! The same model supplies the fallback geometry when a directions provider
//! cannot produce a real walking path.

use chrono::Duration;

use crate::domain::{GeoPoint, duration_from_secs_f64};

/// Default walking pace: 80 metres per minute (about 1.33 m/s).
pub const DEFAULT_WALK_SPEED_M_PER_MIN: f64 = 80.0;

/// A constant-pace walker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkingModel {
    speed_m_per_min: f64,
}

impl Default for WalkingModel {
    fn default() -> Self {
        Self {
            speed_m_per_min: DEFAULT_WALK_SPEED_M_PER_MIN,
        }
    }
}

impl WalkingModel {
    /// Create a model with the given pace.
    ///
    /// Non-positive or non-finite speeds fall back to the default pace.
    pub fn new(speed_m_per_min: f64) -> Self {
        if speed_m_per_min.is_finite() && speed_m_per_min > 0.0 {
            Self { speed_m_per_min }
        } else {
            Self::default()
        }
    }

    pub fn speed_m_per_min(&self) -> f64 {
        self.speed_m_per_min
    }

    /// Time to walk a given distance.
    pub fn duration_for_distance(&self, metres: f64) -> Duration {
        duration_from_secs_f64(metres / self.speed_m_per_min * 60.0)
    }

    /// Time to walk between two points in a straight line.
    ///
    /// # Example
    ///
    /// ```
    /// use transit_planner::walking::WalkingModel;
    /// use transit_planner::domain::GeoPoint;
    /// use chrono::Duration;
    ///
    /// let walk = WalkingModel::default();
    /// let here = GeoPoint::new(-6.30, 106.64);
    /// assert_eq!(walk.duration_between(&here, &here), Duration::zero());
    /// ```
    pub fn duration_between(&self, from: &GeoPoint, to: &GeoPoint) -> Duration {
        self.duration_for_distance(from.distance_to(to))
    }

    /// Two-point path and duration, used when no real path is available.
    pub fn straight_line(&self, from: &GeoPoint, to: &GeoPoint) -> (Vec<GeoPoint>, Duration) {
        (vec![*from, *to], self.duration_between(from, to))
    }
}
