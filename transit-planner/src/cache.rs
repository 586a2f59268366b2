//! Caching layer for directions lookups.
//!
//! Planning the same trip twice asks the directions provider for the same
//! legs again. Paths are cached by (mode, origin, destination), with
//! coordinates rounded to a fixed number of decimal places so that points a
//! few centimetres apart share an entry. Failed lookups are not cached.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::directions::{DirectionsError, DirectionsProvider, PathEstimate};
use crate::domain::{GeoPoint, TravelMode};

/// Cache key: mode plus quantised (lat, lon) of both endpoints.
type PathKey = (TravelMode, i64, i64, i64, i64);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,

    /// Decimal places kept when quantising coordinates (5 is about 1 m).
    pub precision_decimals: u32,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            max_capacity: 1000,
            precision_decimals: 5,
        }
    }
}

/// Directions provider with caching.
///
/// Wraps any `DirectionsProvider` and caches successful estimates.
pub struct CachedDirections<P> {
    provider: P,
    paths: MokaCache<PathKey, PathEstimate>,
    scale: f64,
}

impl<P: DirectionsProvider> CachedDirections<P> {
    /// Create a new cached provider.
    pub fn new(provider: P, config: &CacheConfig) -> Self {
        let paths = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            provider,
            paths,
            scale: 10f64.powi(config.precision_decimals.min(9) as i32),
        }
    }

    fn quantise(&self, value: f64) -> i64 {
        (value * self.scale).round() as i64
    }

    fn key(&self, from: &GeoPoint, to: &GeoPoint, mode: TravelMode) -> PathKey {
        (
            mode,
            self.quantise(from.lat),
            self.quantise(from.lon),
            self.quantise(to.lat),
            self.quantise(to.lon),
        )
    }

    /// Access the underlying provider for lookups that bypass the cache.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.paths.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_cache(&self) {
        self.paths.invalidate_all();
    }
}

impl<P: DirectionsProvider> DirectionsProvider for CachedDirections<P> {
    async fn estimate(
        &self,
        from: GeoPoint,
        to: GeoPoint,
        mode: TravelMode,
    ) -> Result<PathEstimate, DirectionsError> {
        let key = self.key(&from, &to, mode);

        if let Some(cached) = self.paths.get(&key).await {
            trace!(?mode, %from, %to, "directions cache hit");
            return Ok(cached);
        }

        let estimate = self.provider.estimate(from, to, mode).await?;
        self.paths.insert(key, estimate.clone()).await;

        Ok(estimate)
    }
}
