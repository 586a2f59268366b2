//! OSRM HTTP client.
//!
//! Queries an OSRM-compatible route service for walking and driving paths.
//! Requests are bounded by a semaphore so a burst of expansions cannot
//! flood the service.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{GeoPoint, TravelMode, duration_from_secs_f64};

use super::error::DirectionsError;
use super::types::RouteResponse;
use super::{DirectionsProvider, PathEstimate};

/// Default base URL for the route service.
const DEFAULT_BASE_URL: &str = "https://router.project-osrm.org";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Configuration for the OSRM client.
#[derive(Debug, Clone)]
pub struct OsrmConfig {
    /// Base URL for the service
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl OsrmConfig {
    /// Create a config pointing at the given service.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 10,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// OSRM route service client.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl OsrmClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OsrmConfig) -> Result<Self, DirectionsError> {
        if config.max_concurrent == 0 {
            return Err(DirectionsError::NotConfigured(
                "max_concurrent must be at least 1".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// URL for a route query between two points.
    fn route_url(&self, from: &GeoPoint, to: &GeoPoint, mode: TravelMode) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}",
            self.base_url,
            mode.profile(),
            from.lon,
            from.lat,
            to.lon,
            to.lat
        )
    }
}

impl DirectionsProvider for OsrmClient {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::ApiError {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = self.route_url(&from, &to, mode);
        debug!(%url, "requesting directions");

        let response = self
            .http
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        parse_route_body(status, &body, from, to)
    }
}

/// Interpret a route service response.
///
/// OSRM reports "no route" as a 400 with a `NoRoute` code, so the body is
/// inspected even for error statuses.
pub(crate) fn parse_route_body(
    status: u16,
    body: &str,
    from: GeoPoint,
    to: GeoPoint,
) -> Result<PathEstimate, DirectionsError> {
    let parsed: Result<RouteResponse, _> = serde_json::from_str(body);

    let response = match parsed {
        Ok(response) => response,
        Err(e) if (200..300).contains(&status) => {
            return Err(DirectionsError::Json {
                message: e.to_string(),
                body: Some(body.chars().take(500).collect()),
            });
        }
        Err(_) => {
            return Err(DirectionsError::ApiError {
                status,
                message: body.chars().take(500).collect(),
            });
        }
    };

    match response.code.as_str() {
        "Ok" => {}
        "NoRoute" | "NoSegment" => return Err(DirectionsError::NoRoute),
        code => {
            return Err(DirectionsError::ApiError {
                status,
                message: response.message.unwrap_or_else(|| code.to_string()),
            });
        }
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or(DirectionsError::NoRoute)?;

    let mut path = route.geometry.points();
    if path.len() < 2 {
        path = vec![from, to];
    }

    Ok(PathEstimate {
        path,
        duration: duration_from_secs_f64(route.duration),
    })
}
