//! Finding stops near a point.

use std::sync::Arc;

use crate::domain::{GeoPoint, NetworkModel, Stop};

/// Default search radius in metres.
pub const DEFAULT_MAX_DISTANCE_M: f64 = 500.0;

/// Stops within `max_distance_m` metres of `center`, inclusive.
///
/// Results keep the network's stop order, so repeated queries return the
/// same sequence. An empty result is normal, not an error.
pub fn find_nearby_stops(
    network: &NetworkModel,
    center: &GeoPoint,
    max_distance_m: f64,
) -> Vec<Arc<Stop>> {
    network
        .stops()
        .iter()
        .filter(|stop| stop.distance_to(center) <= max_distance_m)
        .cloned()
        .collect()
}

/// Like `find_nearby_stops`, but paired with distances and sorted nearest first.
///
/// Ties keep network order.
pub fn nearby_stops_by_distance(
    network: &NetworkModel,
    center: &GeoPoint,
    max_distance_m: f64,
) -> Vec<(Arc<Stop>, f64)> {
    let mut nearby: Vec<_> = network
        .stops()
        .iter()
        .map(|stop| (Arc::clone(stop), stop.distance_to(center)))
        .filter(|(_, d)| *d <= max_distance_m)
        .collect();

    nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
    nearby
}
