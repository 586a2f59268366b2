//! OSRM route service response DTOs.
//!
//! Only the fields the planner reads are modelled. Geometry is requested as
//! GeoJSON, so coordinates arrive as `[lon, lat]` pairs.

use serde::Deserialize;

use crate::domain::GeoPoint;

/// Response from `/route/v1/{profile}/{coordinates}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    /// "Ok" on success, otherwise an error code such as "NoRoute".
    pub code: String,

    /// Human-readable error detail, present on failure.
    pub message: Option<String>,

    /// Candidate routes, best first.
    #[serde(default)]
    pub routes: Vec<OsrmRoute>,
}

/// One route returned by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct OsrmRoute {
    /// Travel time in seconds.
    pub duration: f64,

    /// Distance in metres.
    pub distance: f64,

    pub geometry: Geometry,
}

/// GeoJSON LineString geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}

impl Geometry {
    /// Convert `[lon, lat]` pairs to points, skipping invalid coordinates.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.coordinates
            .iter()
            .filter_map(|&[lon, lat]| GeoPoint::try_new(lat, lon).ok())
            .collect()
    }
}
