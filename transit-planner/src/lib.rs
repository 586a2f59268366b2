//! Transit journey planner.
//!
//! Answers "which bus gets me from here to there?" over a fixed network of
//! stops and routes: find stops within walking distance of both ends, keep
//! the routes that run forward between them, rank by total time, and
//! expand the chosen itinerary into timed turn-by-turn steps.

pub mod cache;
pub mod directions;
pub mod domain;
pub mod expand;
pub mod places;
pub mod planner;
pub mod proximity;
pub mod schedule;
pub mod session;
pub mod walking;
