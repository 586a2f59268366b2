//! Itinerary expansion into timed steps.
//!
//! A chosen itinerary becomes five steps: the start point, the walk to the
//! boarding stop, the ride, the walk to the destination, and arrival. Each
//! step is stamped with the departure time plus the time elapsed before it
//! starts, so timestamps never decrease.
//!
//! Directions lookups run strictly in order (walk, ride, walk). A failed
//! lookup never fails the expansion: the leg falls back to straight
//! segments timed at walking pace. So does a lookup that reports a negative
//! duration or one longer than `MAX_LEG_HOURS`.

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use tracing::{debug, warn};

use crate::directions::DirectionsProvider;
use crate::domain::{
    GeoPoint, Itinerary, LegPath, PathSource, Step, StepMode, Stop, TravelMode,
};
use crate::walking::WalkingModel;

/// Longest provider duration accepted for a single leg.
pub const MAX_LEG_HOURS: i64 = 24;

/// An expanded itinerary.
#[derive(Debug, Clone)]
pub struct Expansion {
    /// Steps in travel order.
    pub steps: Vec<Step>,

    /// Geometry of the walk, ride and final walk, in that order.
    pub legs: Vec<LegPath>,

    /// Stops from boarding to alighting, inclusive.
    pub visible_stops: Vec<Arc<Stop>>,
}

impl Expansion {
    /// Time of the final step.
    pub fn arrival(&self) -> Option<NaiveDateTime> {
        self.steps.last().map(|s| s.time)
    }

    /// Whether any leg used the straight-line fallback.
    pub fn used_fallback(&self) -> bool {
        self.legs.iter().any(LegPath::is_fallback)
    }
}

/// Expands itineraries using a directions provider.
pub struct ItineraryExpander<'a, D> {
    directions: &'a D,
    walking: WalkingModel,
}

impl<'a, D: DirectionsProvider> ItineraryExpander<'a, D> {
    pub fn new(directions: &'a D, walking: WalkingModel) -> Self {
        Self {
            directions,
            walking,
        }
    }

    /// Expand `itinerary` for a trip from `start` to `end` leaving at
    /// `departed_at`.
    pub async fn expand(
        &self,
        itinerary: &Itinerary,
        start: GeoPoint,
        end: GeoPoint,
        departed_at: NaiveDateTime,
    ) -> Expansion {
        let board = itinerary.board_stop();
        let alight = itinerary.alight_stop();
        let route = itinerary.route();

        let mut steps = Vec::with_capacity(5);
        let mut legs = Vec::with_capacity(3);
        let mut elapsed = Duration::zero();

        steps.push(Step {
            time: departed_at,
            label: "Start Point".to_string(),
            address: None,
            duration: None,
            mode: StepMode::Walk,
            stop_names: None,
            location: start,
        });

        let (walk_in, walk_in_time) = self.leg(start, board.location, TravelMode::Walking).await;
        legs.push(walk_in);
        steps.push(Step {
            time: stamp(departed_at, elapsed),
            label: format!("Walk to {}", board.name),
            address: None,
            duration: Some(walk_in_time),
            mode: StepMode::Walk,
            stop_names: None,
            location: board.location,
        });
        elapsed = advance(elapsed, walk_in_time);

        legs.push(self.ride_leg(itinerary).await);
        let visible_stops = itinerary.ride_stops().to_vec();
        steps.push(Step {
            time: stamp(departed_at, elapsed),
            label: format!("Take {}", route.name()),
            address: None,
            duration: Some(itinerary.ride_time()),
            mode: StepMode::Ride,
            stop_names: Some(visible_stops.iter().map(|s| s.name.clone()).collect()),
            location: alight.location,
        });
        elapsed = advance(elapsed, itinerary.ride_time());

        let (walk_out, walk_out_time) = self.leg(alight.location, end, TravelMode::Walking).await;
        legs.push(walk_out);
        steps.push(Step {
            time: stamp(departed_at, elapsed),
            label: "Walk to Destination".to_string(),
            address: None,
            duration: Some(walk_out_time),
            mode: StepMode::Walk,
            stop_names: None,
            location: end,
        });
        elapsed = advance(elapsed, walk_out_time);

        steps.push(Step {
            time: stamp(departed_at, elapsed),
            label: "Destination".to_string(),
            address: None,
            duration: None,
            mode: StepMode::Arrive,
            stop_names: None,
            location: end,
        });

        debug!(
            route = %route.id(),
            board = %board.id,
            alight = %alight.id,
            elapsed_secs = elapsed.num_seconds(),
            "expanded itinerary"
        );

        Expansion {
            steps,
            legs,
            visible_stops,
        }
    }

    /// Start-to-end driving path for an overview of the trip.
    pub async fn overview(&self, start: GeoPoint, end: GeoPoint) -> LegPath {
        self.leg(start, end, TravelMode::Driving).await.0
    }

    /// One leg from the provider, or a straight line if it fails or
    /// reports an unusable duration.
    async fn leg(&self, from: GeoPoint, to: GeoPoint, mode: TravelMode) -> (LegPath, Duration) {
        match self.directions.estimate(from, to, mode).await {
            Ok(estimate) if is_usable_duration(estimate.duration) => (
                LegPath {
                    mode,
                    points: estimate.path,
                    source: PathSource::Provider,
                },
                estimate.duration,
            ),
            Ok(estimate) => {
                warn!(
                    duration_ms = estimate.duration.num_milliseconds(),
                    ?mode,
                    %from,
                    %to,
                    "directions duration out of range, using straight line"
                );
                self.straight_leg(from, to, mode)
            }
            Err(e) => {
                warn!(error = %e, ?mode, %from, %to, "directions lookup failed, using straight line");
                self.straight_leg(from, to, mode)
            }
        }
    }

    fn straight_leg(&self, from: GeoPoint, to: GeoPoint, mode: TravelMode) -> (LegPath, Duration) {
        let (points, duration) = self.walking.straight_line(&from, &to);
        (
            LegPath {
                mode,
                points,
                source: PathSource::StraightLine,
            },
            duration,
        )
    }

    /// Ride geometry. Falls back to the route's own stop sequence, which
    /// follows the bus better than a single straight segment.
    async fn ride_leg(&self, itinerary: &Itinerary) -> LegPath {
        let route = itinerary.route();
        let (board, alight) = (itinerary.board_index(), itinerary.alight_index());
        let fallback = || LegPath {
            mode: TravelMode::Driving,
            points: route.path_between(board, alight),
            source: PathSource::StraightLine,
        };

        if itinerary.is_same_stop_ride() {
            return fallback();
        }

        let from = itinerary.board_stop().location;
        let to = itinerary.alight_stop().location;
        match self.directions.driving(from, to).await {
            Ok(estimate) => LegPath {
                mode: TravelMode::Driving,
                points: estimate.path,
                source: PathSource::Provider,
            },
            Err(e) => {
                warn!(error = %e, route = %route.id(), "ride path lookup failed, using stop sequence");
                fallback()
            }
        }
    }
}

fn is_usable_duration(duration: Duration) -> bool {
    duration >= Duration::zero() && duration <= Duration::hours(MAX_LEG_HOURS)
}

fn advance(elapsed: Duration, by: Duration) -> Duration {
    elapsed.checked_add(&by).unwrap_or(Duration::MAX)
}

fn stamp(departed_at: NaiveDateTime, elapsed: Duration) -> NaiveDateTime {
    departed_at
        .checked_add_signed(elapsed)
        .unwrap_or(NaiveDateTime::MAX)
}
