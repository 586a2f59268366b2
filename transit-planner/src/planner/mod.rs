//! Single-route itinerary planner.
//!
//! Answers "which route gets me from here to there fastest?" by pairing
//! every stop within walking distance of the start with every stop within
//! walking distance of the end, and keeping the (route, board, alight)
//! combinations where the route runs forward from board to alight.
//!
//! Total time is walk to the boarding stop, plus a flat per-stop riding
//! time, plus walk from the alighting stop. Results are ranked fastest
//! first.

mod config;
mod rank;
mod search;

pub use config::{ConfigError, MAX_RIDE_MINS_PER_STOP, PlannerConfig};
pub use rank::{is_ranked, rank_itineraries};
pub use search::{EmptyReason, ItineraryFinder, PlanRequest, PlanResult};
