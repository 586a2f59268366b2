//! Domain types for the transit journey planner.
//!
//! This module contains the core domain model types that represent the
//! validated stop and route network and the itineraries built from it.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod geo;
mod itinerary;
mod network;
mod route;
mod step;
mod stop;
mod time;

pub use error::{DomainError, NetworkError};
pub use self::geo::{GeoPoint, InvalidCoordinate};
pub use itinerary::{Itinerary, TravelTimes};
pub use network::{NetworkFile, NetworkModel, RouteRecord, StopRecord};
pub use route::{InvalidColor, Route, RouteColor, RouteId, StopIndex};
pub use step::{LegPath, PathSource, Step, StepMode, TravelMode};
pub use stop::{InvalidStopId, Stop, StopId};
pub use time::{MAX_DURATION_SECS, TimeError, TimeOfDay, duration_from_secs_f64, format_duration};
