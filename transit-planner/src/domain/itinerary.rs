//! Candidate itineraries: walk, ride one route, walk.

use std::sync::Arc;

use chrono::Duration;

use super::{DomainError, Route, Stop, StopIndex, TimeOfDay, format_duration};

/// Time estimates for the three parts of an itinerary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TravelTimes {
    pub walk_to_board: Duration,
    pub ride: Duration,
    pub walk_from_alight: Duration,
}

impl TravelTimes {
    pub fn total(&self) -> Duration {
        self.walk_to_board + self.ride + self.walk_from_alight
    }
}

/// One complete candidate journey on a single route.
///
/// # Invariants
///
/// - `board_index <= alight_index`, both within the route's stop sequence
/// - `total_time == walk_to_board + ride_time + walk_from_alight`
#[derive(Debug, Clone)]
pub struct Itinerary {
    route: Arc<Route>,
    board_index: StopIndex,
    alight_index: StopIndex,
    times: TravelTimes,
    total_time: Duration,
    departures: Vec<TimeOfDay>,
}

impl Itinerary {
    /// Construct an itinerary.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the alight index precedes the board index or is past
    /// the end of the route.
    pub fn new(
        route: Arc<Route>,
        board_index: StopIndex,
        alight_index: StopIndex,
        times: TravelTimes,
        departures: Vec<TimeOfDay>,
    ) -> Result<Self, DomainError> {
        if alight_index < board_index {
            return Err(DomainError::InvalidItinerary(
                "alight must not precede board",
            ));
        }
        if alight_index.0 >= route.len() {
            return Err(DomainError::InvalidItinerary("stop index out of bounds"));
        }

        Ok(Self {
            route,
            board_index,
            alight_index,
            total_time: times.total(),
            times,
            departures,
        })
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn board_index(&self) -> StopIndex {
        self.board_index
    }

    pub fn alight_index(&self) -> StopIndex {
        self.alight_index
    }

    pub fn board_stop(&self) -> &Arc<Stop> {
        &self.route.stops()[self.board_index.0]
    }

    pub fn alight_stop(&self) -> &Arc<Stop> {
        &self.route.stops()[self.alight_index.0]
    }

    /// Number of stops ridden (zero when boarding and alighting at the same stop).
    pub fn stop_count(&self) -> usize {
        self.alight_index.0 - self.board_index.0
    }

    /// True if the ride covers no stops.
    pub fn is_same_stop_ride(&self) -> bool {
        self.board_index == self.alight_index
    }

    /// Stops ridden past, board and alight included.
    pub fn ride_stops(&self) -> &[Arc<Stop>] {
        self.route.stops_between(self.board_index, self.alight_index)
    }

    pub fn walk_to_board(&self) -> Duration {
        self.times.walk_to_board
    }

    pub fn ride_time(&self) -> Duration {
        self.times.ride
    }

    pub fn walk_from_alight(&self) -> Duration {
        self.times.walk_from_alight
    }

    pub fn times(&self) -> TravelTimes {
        self.times
    }

    pub fn total_time(&self) -> Duration {
        self.total_time
    }

    /// Total walking time at both ends.
    pub fn total_walk(&self) -> Duration {
        self.times.walk_to_board + self.times.walk_from_alight
    }

    /// Candidate departures from the board stop.
    pub fn departures(&self) -> &[TimeOfDay] {
        &self.departures
    }

    /// Total time as abbreviated text, e.g. "1h 5m".
    pub fn formatted_total_time(&self) -> String {
        format_duration(self.total_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GeoPoint, RouteColor, RouteId, StopId};

    fn route(n: usize) -> Arc<Route> {
        let stops = (0..n)
            .map(|i| {
                Arc::new(Stop::new(
                    StopId::parse(&format!("S{i}")).unwrap(),
                    format!("Stop {i}"),
                    GeoPoint::new(-6.3 + i as f64 * 0.002, 106.64),
                ))
            })
            .collect();
        Arc::new(
            Route::new(
                RouteId::new("R1"),
                "Line 1",
                stops,
                RouteColor::parse("#213284").unwrap(),
            )
            .unwrap(),
        )
    }

    fn times(walk_a: i64, ride: i64, walk_b: i64) -> TravelTimes {
        TravelTimes {
            walk_to_board: Duration::seconds(walk_a),
            ride: Duration::seconds(ride),
            walk_from_alight: Duration::seconds(walk_b),
        }
    }

    #[test]
    fn total_is_sum_of_parts() {
        let it = Itinerary::new(
            route(7),
            StopIndex(2),
            StopIndex(5),
            times(120, 540, 60),
            vec![],
        )
        .unwrap();
        assert_eq!(it.total_time(), Duration::seconds(720));
        assert_eq!(it.total_walk(), Duration::seconds(180));
        assert_eq!(it.stop_count(), 3);
        assert_eq!(it.formatted_total_time(), "12m");
    }

    #[test]
    fn stops_resolve_from_indices() {
        let it = Itinerary::new(route(7), StopIndex(2), StopIndex(5), times(0, 0, 0), vec![])
            .unwrap();
        assert_eq!(it.board_stop().id.as_str(), "S2");
        assert_eq!(it.alight_stop().id.as_str(), "S5");
        let ids: Vec<_> = it.ride_stops().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S2", "S3", "S4", "S5"]);
    }

    #[test]
    fn same_stop_ride_allowed() {
        let it = Itinerary::new(route(3), StopIndex(1), StopIndex(1), times(10, 0, 10), vec![])
            .unwrap();
        assert!(it.is_same_stop_ride());
        assert_eq!(it.stop_count(), 0);
        assert_eq!(it.ride_stops().len(), 1);
    }

    #[test]
    fn invalid_indices_rejected() {
        let backwards = Itinerary::new(route(5), StopIndex(3), StopIndex(1), times(0, 0, 0), vec![]);
        assert!(matches!(backwards, Err(DomainError::InvalidItinerary(_))));

        let past_end = Itinerary::new(route(5), StopIndex(1), StopIndex(5), times(0, 0, 0), vec![]);
        assert!(matches!(past_end, Err(DomainError::InvalidItinerary(_))));
    }
}
