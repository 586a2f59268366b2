//! Departure timetables.
//!
//! The planner asks a `DepartureSchedule` for the departures it should show
//! alongside each itinerary. The bundled `FixedTimetable` is the afternoon
//! service pattern used by the BSD Link app; real timetable data can be
//! supplied per route with `RouteTimetables`.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::domain::{Route, RouteId, TimeOfDay};

/// Source of departure times for a route.
pub trait DepartureSchedule {
    /// Departures for `route`, in ascending time order.
    fn departures(&self, route: &Route) -> Vec<TimeOfDay>;
}

impl<S: DepartureSchedule + ?Sized> DepartureSchedule for &S {
    fn departures(&self, route: &Route) -> Vec<TimeOfDay> {
        (**self).departures(route)
    }
}

impl<S: DepartureSchedule + ?Sized> DepartureSchedule for Box<S> {
    fn departures(&self, route: &Route) -> Vec<TimeOfDay> {
        (**self).departures(route)
    }
}

impl<S: DepartureSchedule + ?Sized> DepartureSchedule for std::sync::Arc<S> {
    fn departures(&self, route: &Route) -> Vec<TimeOfDay> {
        (**self).departures(route)
    }
}

/// A run of hours that share the same departure minutes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBand {
    pub hours: RangeInclusive<u32>,
    pub minutes: Vec<u32>,
}

impl ServiceBand {
    pub fn new(hours: RangeInclusive<u32>, minutes: &[u32]) -> Self {
        Self {
            hours,
            minutes: minutes.to_vec(),
        }
    }
}

/// The same departures for every route, built from hour bands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedTimetable {
    times: Vec<TimeOfDay>,
}

impl FixedTimetable {
    /// Build a timetable from bands. Out-of-range hours or minutes are
    /// skipped, and the result is sorted and deduplicated.
    pub fn from_bands(bands: &[ServiceBand]) -> Self {
        let mut times: Vec<TimeOfDay> = bands
            .iter()
            .flat_map(|band| {
                band.hours.clone().flat_map(move |hour| {
                    band.minutes
                        .iter()
                        .filter_map(move |&minute| TimeOfDay::from_hm(hour, minute).ok())
                })
            })
            .collect();
        times.sort();
        times.dedup();
        Self { times }
    }

    /// The afternoon pattern: 14-15h at :17/:37/:57, 16-18h at
    /// :04/:24/:54/:59, 19h at :10/:30.
    pub fn afternoon() -> Self {
        Self::from_bands(&[
            ServiceBand::new(14..=15, &[17, 37, 57]),
            ServiceBand::new(16..=18, &[4, 24, 54, 59]),
            ServiceBand::new(19..=19, &[10, 30]),
        ])
    }

    pub fn times(&self) -> &[TimeOfDay] {
        &self.times
    }
}

impl Default for FixedTimetable {
    fn default() -> Self {
        Self::afternoon()
    }
}

impl DepartureSchedule for FixedTimetable {
    fn departures(&self, _route: &Route) -> Vec<TimeOfDay> {
        self.times.clone()
    }
}

/// Departures of the default afternoon timetable.
pub fn generate_departures() -> Vec<TimeOfDay> {
    FixedTimetable::afternoon().times
}

/// Per-route timetables with a fallback for routes that have none.
pub struct RouteTimetables<F = FixedTimetable> {
    tables: HashMap<RouteId, Vec<TimeOfDay>>,
    fallback: F,
}

impl RouteTimetables<FixedTimetable> {
    /// Per-route tables falling back to the afternoon pattern.
    pub fn new() -> Self {
        Self::with_fallback(FixedTimetable::afternoon())
    }
}

impl Default for RouteTimetables<FixedTimetable> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: DepartureSchedule> RouteTimetables<F> {
    pub fn with_fallback(fallback: F) -> Self {
        Self {
            tables: HashMap::new(),
            fallback,
        }
    }

    /// Set the departures for one route. Times are sorted and deduplicated.
    pub fn insert(&mut self, route: RouteId, mut times: Vec<TimeOfDay>) {
        times.sort();
        times.dedup();
        self.tables.insert(route, times);
    }

    pub fn has_table(&self, route: &RouteId) -> bool {
        self.tables.contains_key(route)
    }
}

impl<F: DepartureSchedule> DepartureSchedule for RouteTimetables<F> {
    fn departures(&self, route: &Route) -> Vec<TimeOfDay> {
        match self.tables.get(route.id()) {
            Some(times) => times.clone(),
            None => self.fallback.departures(route),
        }
    }
}

/// Departures at or after `after`.
pub fn upcoming(departures: &[TimeOfDay], after: TimeOfDay) -> Vec<TimeOfDay> {
    departures.iter().copied().filter(|t| *t >= after).collect()
}
