//! Place search.
//!
//! The planner takes coordinates, not text. This module is the boundary to
//! whatever turns a typed query into candidate places: a `Geocoder` searches
//! within a bias region, and results outside the served locality are
//! dropped before they reach the user.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::{GeoPoint, NetworkModel};

/// Locality the bundled network serves.
pub const DEFAULT_LOCALITY: &str = "tangerang";

/// Errors from a geocoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("geocoding not available: {0}")]
    Unavailable(String),
}

/// A rectangular region used to bias search results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRegion {
    pub center: GeoPoint,
    /// Full height of the region in degrees of latitude.
    pub lat_span: f64,
    /// Full width of the region in degrees of longitude.
    pub lon_span: f64,
}

impl SearchRegion {
    pub fn new(center: GeoPoint, lat_span: f64, lon_span: f64) -> Self {
        Self {
            center,
            lat_span: lat_span.abs(),
            lon_span: lon_span.abs(),
        }
    }

    /// Greater Tangerang, 0.2 degrees square.
    pub fn tangerang() -> Self {
        Self::new(GeoPoint::new(-6.1781, 106.6319), 0.2, 0.2)
    }

    /// A region framing two points, centred between them with each span
    /// 2.5 times their separation and at least 0.01 degrees.
    pub fn framing(a: GeoPoint, b: GeoPoint) -> Self {
        let center = GeoPoint::new((a.lat + b.lat) / 2.0, (a.lon + b.lon) / 2.0);
        let lat_span = ((a.lat - b.lat).abs() * 2.5).max(0.01);
        let lon_span = ((a.lon - b.lon).abs() * 2.5).max(0.01);
        Self::new(center, lat_span, lon_span)
    }

    /// Check whether a point lies inside the region (edges included).
    pub fn contains(&self, point: &GeoPoint) -> bool {
        (point.lat - self.center.lat).abs() <= self.lat_span / 2.0
            && (point.lon - self.center.lon).abs() <= self.lon_span / 2.0
    }
}

/// A named place returned by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceCandidate {
    pub name: String,
    pub location: GeoPoint,
    /// City or town, when the geocoder knows it.
    pub locality: Option<String>,
}

/// Trait for turning free text into candidate places.
#[allow(async_fn_in_trait)]
pub trait Geocoder {
    /// Search for places matching `query`, biased towards `region`.
    async fn search(
        &self,
        query: &str,
        region: &SearchRegion,
    ) -> Result<Vec<PlaceCandidate>, GeocodeError>;
}

/// Keep candidates whose locality contains `locality`, ignoring case.
/// Candidates with no locality are dropped.
pub fn filter_by_locality(candidates: Vec<PlaceCandidate>, locality: &str) -> Vec<PlaceCandidate> {
    let wanted = locality.to_lowercase();
    candidates
        .into_iter()
        .filter(|c| {
            c.locality
                .as_deref()
                .is_some_and(|l| l.to_lowercase().contains(&wanted))
        })
        .collect()
}

/// Search for places in `locality`.
///
/// A blank query returns no candidates without calling the geocoder.
pub async fn search_places<G: Geocoder>(
    geocoder: &G,
    query: &str,
    region: &SearchRegion,
    locality: &str,
) -> Result<Vec<PlaceCandidate>, GeocodeError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let candidates = geocoder.search(query, region).await?;
    let found = candidates.len();
    let kept = filter_by_locality(candidates, locality);

    debug!(query, found, kept = kept.len(), "place search");
    Ok(kept)
}

/// Offline geocoder that matches stop names in a network.
pub struct StopGeocoder {
    network: Arc<NetworkModel>,
    locality: Option<String>,
}

impl StopGeocoder {
    /// Every stop is reported with the given locality.
    pub fn new(network: Arc<NetworkModel>, locality: Option<String>) -> Self {
        Self { network, locality }
    }
}

impl Geocoder for StopGeocoder {
    async fn search(
        &self,
        query: &str,
        region: &SearchRegion,
    ) -> Result<Vec<PlaceCandidate>, GeocodeError> {
        let wanted = query.to_lowercase();
        Ok(self
            .network
            .stops()
            .iter()
            .filter(|s| region.contains(&s.location) && s.name.to_lowercase().contains(&wanted))
            .map(|s| PlaceCandidate {
                name: s.name.clone(),
                location: s.location,
                locality: self.locality.clone(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedGeocoder {
        results: Vec<PlaceCandidate>,
        calls: AtomicUsize,
    }

    impl Geocoder for FixedGeocoder {
        async fn search(
            &self,
            _query: &str,
            _region: &SearchRegion,
        ) -> Result<Vec<PlaceCandidate>, GeocodeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }
    }

    fn candidate(name: &str, locality: Option<&str>) -> PlaceCandidate {
        PlaceCandidate {
            name: name.to_string(),
            location: GeoPoint::new(-6.3, 106.65),
            locality: locality.map(str::to_string),
        }
    }

    fn geocoder() -> FixedGeocoder {
        FixedGeocoder {
            results: vec![
                candidate("AEON Mall BSD", Some("Tangerang Selatan")),
                candidate("Grand Indonesia", Some("Jakarta Pusat")),
                candidate("Somewhere", None),
                candidate("Bandara Soekarno-Hatta", Some("Kota TANGERANG")),
            ],
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn tangerang_region() {
        let region = SearchRegion::tangerang();
        assert!(region.contains(&GeoPoint::new(-6.1781, 106.6319)));
        assert!(region.contains(&GeoPoint::new(-6.25, 106.70)));
        assert!(!region.contains(&GeoPoint::new(-6.3, 106.6319)));
        assert!(!region.contains(&GeoPoint::new(-6.2, 106.8)));
    }

    #[test]
    fn framing_has_minimum_span() {
        let p = GeoPoint::new(-6.3, 106.64);
        let region = SearchRegion::framing(p, p);
        assert_eq!(region.center, p);
        assert_eq!(region.lat_span, 0.01);
        assert_eq!(region.lon_span, 0.01);

        let region = SearchRegion::framing(GeoPoint::new(-6.3, 106.6), GeoPoint::new(-6.2, 106.6));
        assert!((region.lat_span - 0.25).abs() < 1e-9);
        assert!((region.center.lat - -6.25).abs() < 1e-9);
    }

    #[test]
    fn locality_filter_is_case_insensitive() {
        let kept = filter_by_locality(geocoder().results, "tangerang");
        let names: Vec<&str> = kept.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["AEON Mall BSD", "Bandara Soekarno-Hatta"]);
    }

    #[tokio::test]
    async fn blank_query_skips_geocoder() {
        let geocoder = geocoder();
        let region = SearchRegion::tangerang();

        let found = search_places(&geocoder, "   ", &region, DEFAULT_LOCALITY)
            .await
            .unwrap();

        assert!(found.is_empty());
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_filters_results() {
        let geocoder = geocoder();
        let region = SearchRegion::tangerang();

        let found = search_places(&geocoder, "mall", &region, DEFAULT_LOCALITY)
            .await
            .unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stop_geocoder_matches_names_in_region() {
        let network = Arc::new(NetworkModel::bsd_link().unwrap());
        let geocoder = StopGeocoder::new(network, Some("Tangerang Selatan".into()));
        let bsd = SearchRegion::new(GeoPoint::new(-6.30, 106.65), 0.2, 0.2);

        let found = search_places(&geocoder, "intermoda", &bsd, DEFAULT_LOCALITY)
            .await
            .unwrap();
        assert!(!found.is_empty());
        assert!(found.iter().all(|c| c.name.to_lowercase().contains("intermoda")));

        // The Tangerang city region does not reach BSD.
        let found = search_places(&geocoder, "intermoda", &SearchRegion::tangerang(), DEFAULT_LOCALITY)
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
