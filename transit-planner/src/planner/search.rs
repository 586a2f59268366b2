//! Itinerary search.
//!
//! Finds single-route itineraries between two points: walk to a stop near
//! the start, ride one route forward, walk from a stop near the end.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::domain::{GeoPoint, Itinerary, LegPath, NetworkModel, Route, Stop, TravelTimes};
use crate::proximity::find_nearby_stops;
use crate::schedule::DepartureSchedule;

use super::config::PlannerConfig;
use super::rank::rank_itineraries;

/// Request for itinerary search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl PlanRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }
}

/// Why a search produced no itineraries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// No stop within walking distance of the start.
    NoStopsNearStart,
    /// No stop within walking distance of the end.
    NoStopsNearEnd,
    /// Stops exist at both ends but no route runs forward between them.
    NoFeasibleRoute,
}

/// Result of itinerary search.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Found itineraries, fastest first.
    pub itineraries: Vec<Itinerary>,

    /// Stops considered for boarding.
    pub start_stops: Vec<Arc<Stop>>,

    /// Stops considered for alighting.
    pub end_stops: Vec<Arc<Stop>>,

    /// Number of (board, alight, route) combinations evaluated.
    pub combinations_evaluated: usize,

    /// Start-to-end overview path, when a directions provider was consulted.
    pub overview: Option<LegPath>,
}

impl PlanResult {
    /// Explain an empty result. Returns `None` when itineraries were found.
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.itineraries.is_empty() {
            return None;
        }
        if self.start_stops.is_empty() {
            Some(EmptyReason::NoStopsNearStart)
        } else if self.end_stops.is_empty() {
            Some(EmptyReason::NoStopsNearEnd)
        } else {
            Some(EmptyReason::NoFeasibleRoute)
        }
    }

    pub fn fastest(&self) -> Option<&Itinerary> {
        self.itineraries.first()
    }
}

/// Itinerary finder over a fixed network.
pub struct ItineraryFinder<'a, S: DepartureSchedule> {
    network: &'a NetworkModel,
    schedule: &'a S,
    config: &'a PlannerConfig,
}

impl<'a, S: DepartureSchedule> ItineraryFinder<'a, S> {
    /// Create a new finder.
    pub fn new(network: &'a NetworkModel, schedule: &'a S, config: &'a PlannerConfig) -> Self {
        Self {
            network,
            schedule,
            config,
        }
    }

    /// Itineraries from `start` to `end`, fastest first.
    pub fn find_itineraries(&self, start: GeoPoint, end: GeoPoint) -> Vec<Itinerary> {
        self.search(&PlanRequest::new(start, end)).itineraries
    }

    /// Search for itineraries, keeping the intermediate candidate stops.
    pub fn search(&self, request: &PlanRequest) -> PlanResult {
        let start_stops =
            find_nearby_stops(self.network, &request.start, self.config.max_walk_distance_m);
        let end_stops =
            find_nearby_stops(self.network, &request.end, self.config.max_walk_distance_m);

        debug!(
            start = %request.start,
            end = %request.end,
            start_stops = start_stops.len(),
            end_stops = end_stops.len(),
            "searching itineraries"
        );

        let mut itineraries = Vec::new();
        let mut combinations_evaluated = 0;

        for board in &start_stops {
            for alight in &end_stops {
                for route in self.network.routes() {
                    combinations_evaluated += 1;
                    if let Some(itinerary) = self.evaluate(request, route, board, alight) {
                        itineraries.push(itinerary);
                    }
                }
            }
        }

        let mut itineraries = rank_itineraries(itineraries);
        if let Some(max) = self.config.max_results {
            itineraries.truncate(max);
        }

        debug!(
            found = itineraries.len(),
            combinations_evaluated, "itinerary search complete"
        );

        PlanResult {
            itineraries,
            start_stops,
            end_stops,
            combinations_evaluated,
            overview: None,
        }
    }

    /// Build the itinerary for one (route, board, alight) combination, if
    /// the route runs forward from `board` to `alight`.
    fn evaluate(
        &self,
        request: &PlanRequest,
        route: &Arc<Route>,
        board: &Stop,
        alight: &Stop,
    ) -> Option<Itinerary> {
        let (board_idx, alight_idx) = route.ride_indices(&board.id, &alight.id)?;

        if board_idx == alight_idx && !self.config.keep_same_stop_rides {
            trace!(route = %route.id(), stop = %board.id, "skipping same-stop ride");
            return None;
        }

        let stop_count = board_idx.stops_until(alight_idx)?;
        let Some(ride) = self.config.ride_time(stop_count) else {
            trace!(route = %route.id(), stop_count, "ride time out of range");
            return None;
        };
        let walking = self.config.walking();
        let times = TravelTimes {
            walk_to_board: walking.duration_between(&request.start, &board.location),
            ride,
            walk_from_alight: walking.duration_between(&alight.location, &request.end),
        };

        trace!(
            route = %route.id(),
            board = %board.id,
            alight = %alight.id,
            stop_count,
            total_secs = times.total().num_seconds(),
            "feasible itinerary"
        );

        let departures = self.schedule.departures(route);
        Itinerary::new(Arc::clone(route), board_idx, alight_idx, times, departures).ok()
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
