//! Itinerary ranking for search results.

use crate::domain::Itinerary;

/// Rank itineraries fastest first.
///
/// Sorting is by total time only and is stable: itineraries with equal
/// totals keep the order in which they were discovered.
pub fn rank_itineraries(mut itineraries: Vec<Itinerary>) -> Vec<Itinerary> {
    itineraries.sort_by_key(|it| it.total_time());
    itineraries
}

/// Check whether itineraries are in non-decreasing total-time order.
pub fn is_ranked(itineraries: &[Itinerary]) -> bool {
    itineraries
        .windows(2)
        .all(|w| w[0].total_time() <= w[1].total_time())
}
