//! Unit tests for itinerary search.

use super::*;
use crate::domain::{RouteColor, RouteId, StopId};
use crate::planner::is_ranked;
use crate::schedule::{FixedTimetable, RouteTimetables};
use chrono::Duration;
use proptest::prelude::*;

/// Stops `S0..S{n-1}` along the equator, ~2.2 km apart, so a 500 m search
/// around a stop finds only that stop.
fn stop_at(i: usize) -> GeoPoint {
    GeoPoint::new(0.0, i as f64 * 0.02)
}

fn make_network(stop_count: usize, routes: &[(&str, &[usize])]) -> NetworkModel {
    let stops: Vec<Arc<Stop>> = (0..stop_count)
        .map(|i| {
            Arc::new(Stop::new(
                StopId::parse(&format!("S{i}")).unwrap(),
                format!("Stop {i}"),
                stop_at(i),
            ))
        })
        .collect();

    let routes = routes
        .iter()
        .map(|(id, seq)| {
            Route::new(
                RouteId::new(*id),
                format!("Route {id}"),
                seq.iter().map(|&i| Arc::clone(&stops[i])).collect(),
                RouteColor::parse("#213284").unwrap(),
            )
            .unwrap()
        })
        .collect();

    NetworkModel::new("Test", stops, routes).unwrap()
}

fn search(network: &NetworkModel, config: &PlannerConfig, start: GeoPoint, end: GeoPoint) -> PlanResult {
    let schedule = FixedTimetable::afternoon();
    ItineraryFinder::new(network, &schedule, config).search(&PlanRequest::new(start, end))
}

/// A point `metres` north of `p`.
fn north_of(p: GeoPoint, metres: f64) -> GeoPoint {
    GeoPoint::new(p.lat + metres / 111_195.0, p.lon)
}

#[test]
fn ride_time_counts_stops() {
    // Board at index 2, alight at index 5 of a 7-stop route
    let net = make_network(7, &[("R1", &[0, 1, 2, 3, 4, 5, 6])]);
    let config = PlannerConfig::default();

    let result = search(&net, &config, stop_at(2), stop_at(5));

    assert_eq!(result.itineraries.len(), 1);
    let it = &result.itineraries[0];
    assert_eq!(it.board_stop().id.as_str(), "S2");
    assert_eq!(it.alight_stop().id.as_str(), "S5");
    assert_eq!(it.ride_time(), Duration::minutes(9));
    assert_eq!(it.walk_to_board(), Duration::zero());
    assert_eq!(it.walk_from_alight(), Duration::zero());
    assert_eq!(it.total_time(), Duration::minutes(9));
    assert_eq!(result.empty_reason(), None);
}

#[test]
fn walking_time_added_at_both_ends() {
    let net = make_network(4, &[("R1", &[0, 1, 2, 3])]);
    let config = PlannerConfig::default();

    // 160 m from the board stop, 240 m from the alight stop
    let start = north_of(stop_at(0), 160.0);
    let end = north_of(stop_at(3), 240.0);
    let result = search(&net, &config, start, end);

    let it = &result.itineraries[0];
    assert_eq!(it.walk_to_board().num_seconds(), 120);
    assert_eq!(it.walk_from_alight().num_seconds(), 180);
    assert_eq!(it.total_time().num_seconds(), 120 + 9 * 60 + 180);
}

#[test]
fn route_is_not_ridden_backwards() {
    let net = make_network(7, &[("R1", &[0, 1, 2, 3, 4, 5, 6])]);
    let config = PlannerConfig::default();

    let result = search(&net, &config, stop_at(5), stop_at(2));

    assert!(result.itineraries.is_empty());
    assert_eq!(result.start_stops.len(), 1);
    assert_eq!(result.end_stops.len(), 1);
    assert_eq!(result.empty_reason(), Some(EmptyReason::NoFeasibleRoute));
}

#[test]
fn no_stops_nearby_is_empty_not_error() {
    let net = make_network(3, &[("R1", &[0, 1, 2])]);
    let config = PlannerConfig::default();
    let nowhere = GeoPoint::new(45.0, 45.0);

    let result = search(&net, &config, nowhere, nowhere);
    assert!(result.itineraries.is_empty());
    assert_eq!(result.empty_reason(), Some(EmptyReason::NoStopsNearStart));
    assert_eq!(result.combinations_evaluated, 0);

    let result = search(&net, &config, stop_at(0), nowhere);
    assert!(result.itineraries.is_empty());
    assert_eq!(result.empty_reason(), Some(EmptyReason::NoStopsNearEnd));
}

#[test]
fn same_stop_ride_kept_by_default() {
    let net = make_network(3, &[("R1", &[0, 1, 2])]);
    let near = north_of(stop_at(1), 80.0);

    let config = PlannerConfig::default();
    let result = search(&net, &config, near, near);
    assert_eq!(result.itineraries.len(), 1);
    let it = &result.itineraries[0];
    assert!(it.is_same_stop_ride());
    assert_eq!(it.ride_time(), Duration::zero());
    assert_eq!(it.total_time(), Duration::minutes(2));

    let config = PlannerConfig {
        keep_same_stop_rides: false,
        ..PlannerConfig::default()
    };
    let result = search(&net, &config, near, near);
    assert!(result.itineraries.is_empty());
    assert_eq!(result.empty_reason(), Some(EmptyReason::NoFeasibleRoute));
}

#[test]
fn faster_route_ranked_first() {
    // R1 stops everywhere, R2 runs express from S1 to S5
    let net = make_network(
        6,
        &[("R1", &[0, 1, 2, 3, 4, 5]), ("R2", &[1, 5])],
    );
    let config = PlannerConfig::default();

    let result = search(&net, &config, stop_at(1), stop_at(5));

    let routes: Vec<_> = result
        .itineraries
        .iter()
        .map(|it| it.route().id().as_str())
        .collect();
    assert_eq!(routes, vec!["R2", "R1"]);
    assert_eq!(result.itineraries[0].ride_time(), Duration::minutes(3));
    assert_eq!(result.itineraries[1].ride_time(), Duration::minutes(12));
    assert_eq!(result.combinations_evaluated, 2);
}

#[test]
fn loop_route_uses_first_occurrence() {
    // S1 is visited at index 0 and again at index 3
    let net = make_network(5, &[("LOOP", &[1, 2, 3, 1, 4])]);
    let config = PlannerConfig::default();

    // S3 (index 2) -> S1: first S1 is index 0, so not reachable forwards
    let result = search(&net, &config, stop_at(3), stop_at(1));
    assert!(result.itineraries.is_empty());

    // S1 -> S4: boards at the first visit, index 0
    let result = search(&net, &config, stop_at(1), stop_at(4));
    let it = &result.itineraries[0];
    assert_eq!(it.board_index().0, 0);
    assert_eq!(it.alight_index().0, 4);
    assert_eq!(it.ride_time(), Duration::minutes(12));
}

#[test]
fn each_nearby_board_stop_gives_an_itinerary() {
    // Two stops 300 m apart both within reach of the start
    let mut stops: Vec<Arc<Stop>> = (0..3)
        .map(|i| {
            Arc::new(Stop::new(
                StopId::parse(&format!("S{i}")).unwrap(),
                format!("Stop {i}"),
                stop_at(i),
            ))
        })
        .collect();
    stops.push(Arc::new(Stop::new(
        StopId::parse("S0b").unwrap(),
        "Stop 0b",
        north_of(stop_at(0), 300.0),
    )));
    let route = Route::new(
        RouteId::new("R1"),
        "Route R1",
        vec![
            Arc::clone(&stops[3]),
            Arc::clone(&stops[0]),
            Arc::clone(&stops[1]),
            Arc::clone(&stops[2]),
        ],
        RouteColor::parse("#213284").unwrap(),
    )
    .unwrap();
    let net = NetworkModel::new("Test", stops, vec![route]).unwrap();
    let config = PlannerConfig::default();

    let start = north_of(stop_at(0), 250.0);
    let result = search(&net, &config, start, stop_at(2));

    assert_eq!(result.itineraries.len(), 2);
    assert!(
        result
            .itineraries
            .iter()
            .all(|it| it.route().id().as_str() == "R1")
    );
    // S0b is 50 m away but one stop further back: 37.5 s + 9 min
    // S0 is 250 m away: 187.5 s + 6 min
    assert_eq!(result.itineraries[0].board_stop().id.as_str(), "S0");
    assert_eq!(result.itineraries[1].board_stop().id.as_str(), "S0b");
    assert!(is_ranked(&result.itineraries));
}

#[test]
fn departures_come_from_schedule() {
    let net = make_network(3, &[("R1", &[0, 1, 2]), ("R2", &[0, 2])]);
    let config = PlannerConfig::default();

    let mut tables = RouteTimetables::new();
    tables.insert(
        RouteId::new("R2"),
        vec![crate::domain::TimeOfDay::parse_hhmm("07:05").unwrap()],
    );

    let finder = ItineraryFinder::new(&net, &tables, &config);
    let itineraries = finder.find_itineraries(stop_at(0), stop_at(2));

    assert_eq!(itineraries.len(), 2);
    let r2 = itineraries
        .iter()
        .find(|it| it.route().id().as_str() == "R2")
        .unwrap();
    assert_eq!(r2.departures().len(), 1);
    let r1 = itineraries
        .iter()
        .find(|it| it.route().id().as_str() == "R1")
        .unwrap();
    assert_eq!(r1.departures().len(), 20);
}

#[test]
fn out_of_range_ride_time_finds_nothing() {
    let net = make_network(4, &[("R1", &[0, 1, 2, 3])]);
    let config = PlannerConfig {
        ride_mins_per_stop: i64::MAX,
        ..PlannerConfig::default()
    };

    let result = search(&net, &config, stop_at(0), stop_at(3));
    assert!(result.itineraries.is_empty());
    assert_eq!(result.combinations_evaluated, 1);
    assert_eq!(result.empty_reason(), Some(EmptyReason::NoFeasibleRoute));
}

#[test]
fn max_results_truncates_after_ranking() {
    let net = make_network(
        6,
        &[("SLOW", &[0, 1, 2, 3, 4, 5]), ("FAST", &[0, 5]), ("MID", &[0, 3, 5])],
    );
    let config = PlannerConfig {
        max_results: Some(2),
        ..PlannerConfig::default()
    };

    let result = search(&net, &config, stop_at(0), stop_at(5));
    let routes: Vec<_> = result
        .itineraries
        .iter()
        .map(|it| it.route().id().as_str())
        .collect();
    assert_eq!(routes, vec!["FAST", "MID"]);
}

#[test]
fn repeated_search_is_deterministic() {
    let net = NetworkModel::bsd_link().unwrap();
    let config = PlannerConfig::default();
    let start = GeoPoint::new(-6.3195, 106.6440);
    let end = GeoPoint::new(-6.3025, 106.6422);

    let key = |result: &PlanResult| {
        result
            .itineraries
            .iter()
            .map(|it| {
                (
                    it.route().id().clone(),
                    it.board_index(),
                    it.alight_index(),
                    it.total_time(),
                )
            })
            .collect::<Vec<_>>()
    };

    let first = search(&net, &config, start, end);
    let second = search(&net, &config, start, end);
    assert!(!first.itineraries.is_empty());
    assert_eq!(key(&first), key(&second));
}

/// Route stop sequence over a handful of far-apart stops, repeats allowed.
fn route_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..6, 1..12)
}

proptest! {
    /// An itinerary exists exactly when the board stop's first visit is not
    /// after the alight stop's first visit.
    #[test]
    fn found_iff_forward(seq in route_strategy(), a in 0usize..6, b in 0usize..6) {
        let net = make_network(6, &[("R", seq.as_slice())]);
        let config = PlannerConfig::default();

        let result = search(&net, &config, stop_at(a), stop_at(b));

        let first = |s: usize| seq.iter().position(|&x| x == s);
        let expected = match (first(a), first(b)) {
            (Some(ia), Some(ib)) => ia <= ib,
            _ => false,
        };
        prop_assert_eq!(!result.itineraries.is_empty(), expected);
        prop_assert!(result.itineraries.len() <= 1);
    }

    /// Ride time is exactly three minutes per stop travelled
    #[test]
    fn ride_time_is_per_stop(seq in route_strategy(), a in 0usize..6, b in 0usize..6) {
        let net = make_network(6, &[("R", seq.as_slice())]);
        let config = PlannerConfig::default();

        for it in search(&net, &config, stop_at(a), stop_at(b)).itineraries {
            let stops = (it.alight_index().0 - it.board_index().0) as i64;
            prop_assert_eq!(it.ride_time(), Duration::minutes(3 * stops));
            prop_assert_eq!(
                it.total_time(),
                it.walk_to_board() + it.ride_time() + it.walk_from_alight()
            );
        }
    }

    /// Results over the real network are always fastest first
    #[test]
    fn bsd_results_are_ranked(
        start_lat in -6.325f64..-6.28,
        start_lon in 106.62f64..106.69,
        end_lat in -6.325f64..-6.28,
        end_lon in 106.62f64..106.69,
    ) {
        let net = NetworkModel::bsd_link().unwrap();
        let config = PlannerConfig::default();
        let result = search(
            &net,
            &config,
            GeoPoint::new(start_lat, start_lon),
            GeoPoint::new(end_lat, end_lon),
        );
        prop_assert!(is_ranked(&result.itineraries));
    }
}
