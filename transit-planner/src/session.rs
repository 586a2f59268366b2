//! Planning sessions.
//!
//! A session plans one trip at a time. Every call to `plan` (or `clear`)
//! starts a new generation; an expansion still waiting on the directions
//! provider when the generation moves on is dropped and reported as
//! superseded, so stale steps never reach the caller.

use std::sync::Arc;

use chrono::NaiveDateTime;
use thiserror::Error;
use tokio::sync::watch;
use tracing::debug;

use crate::directions::DirectionsProvider;
use crate::domain::{Itinerary, NetworkModel};
use crate::expand::{Expansion, ItineraryExpander};
use crate::planner::{ItineraryFinder, PlanRequest, PlanResult, PlannerConfig};
use crate::schedule::DepartureSchedule;

/// Errors from a planning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("superseded by a newer planning request")]
    Superseded,
}

/// Plans trips over one network, one request at a time.
pub struct PlanningSession<S, D> {
    network: Arc<NetworkModel>,
    schedule: S,
    directions: D,
    config: PlannerConfig,
    generation: watch::Sender<u64>,
}

impl<S: DepartureSchedule, D: DirectionsProvider> PlanningSession<S, D> {
    pub fn new(network: Arc<NetworkModel>, schedule: S, directions: D, config: PlannerConfig) -> Self {
        Self {
            network,
            schedule,
            directions,
            config,
            generation: watch::Sender::new(0),
        }
    }

    pub fn network(&self) -> &NetworkModel {
        &self.network
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Current request generation.
    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }

    /// Plan a trip, superseding any expansion in flight.
    ///
    /// The result carries a driving overview of the whole trip, which falls
    /// back to a straight line if the provider fails.
    pub async fn plan(&self, request: PlanRequest) -> PlanResult {
        self.bump();

        let finder = ItineraryFinder::new(&self.network, &self.schedule, &self.config);
        let mut result = finder.search(&request);

        result.overview = Some(self.expander().overview(request.start, request.end).await);
        result
    }

    /// Expand a chosen itinerary into timed steps.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Superseded` if `plan` or `clear` is called
    /// before the expansion completes.
    pub async fn expand(
        &self,
        itinerary: &Itinerary,
        request: &PlanRequest,
        departed_at: NaiveDateTime,
    ) -> Result<Expansion, SessionError> {
        let mut changed = self.generation.subscribe();
        let generation = *changed.borrow_and_update();
        let expander = self.expander();

        tokio::select! {
            biased;

            _ = changed.changed() => {
                debug!(generation, "expansion superseded");
                Err(SessionError::Superseded)
            }
            expansion = expander.expand(itinerary, request.start, request.end, departed_at) => {
                Ok(expansion)
            }
        }
    }

    /// Discard the current request; any expansion in flight is superseded.
    pub fn clear(&self) {
        self.bump();
    }

    fn bump(&self) {
        self.generation.send_modify(|g| *g += 1);
    }

    fn expander(&self) -> ItineraryExpander<'_, D> {
        ItineraryExpander::new(&self.directions, self.config.walking())
    }
}
