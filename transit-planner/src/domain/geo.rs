//! Geographic coordinates and great-circle distance.

use std::fmt;

use ::geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// Error returned when a coordinate is outside the valid range.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("invalid coordinate ({lat}, {lon}): {reason}")]
pub struct InvalidCoordinate {
    lat: f64,
    lon: f64,
    reason: &'static str,
}

/// A WGS84 position in decimal degrees.
///
/// # Examples
///
/// ```
/// use transit_planner::domain::GeoPoint;
///
/// let intermoda = GeoPoint::new(-6.3199, 106.6437);
/// assert_eq!(intermoda.distance_to(&intermoda), 0.0);
///
/// // Out-of-range latitudes are rejected by the checked constructor
/// assert!(GeoPoint::try_new(91.0, 0.0).is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Create a point without range checks.
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a point, rejecting non-finite or out-of-range values.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, InvalidCoordinate> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "must be finite",
            });
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "latitude must be within -90..=90",
            });
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidCoordinate {
                lat,
                lon,
                reason: "longitude must be within -180..=180",
            });
        }
        Ok(Self { lat, lon })
    }

    /// Great-circle distance to `other` in metres (haversine).
    pub fn distance_to(&self, other: &GeoPoint) -> f64 {
        self.to_point().haversine_distance(&other.to_point())
    }

    /// As a `geo` point (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }
}

impl fmt::Debug for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GeoPoint({:.6}, {:.6})", self.lat, self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lon)
    }
}
