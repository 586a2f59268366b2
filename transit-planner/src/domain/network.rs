//! The static stop and route network.
//!
//! A network is loaded once from a JSON data file and is read-only
//! afterwards. Routes refer to stops by id in the file; loading resolves those
//! references and fails if any is missing, since that means the data is
//! corrupt.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DomainError, GeoPoint, NetworkError, Route, RouteColor, RouteId, Stop, StopId};

/// The bundled BSD Link network.
const BSD_LINK_JSON: &str = include_str!("../../data/bsd_link.json");

/// A stop as written in a network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopRecord {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

/// A route as written in a network file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRecord {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Stop ids in travel order. Repeats are allowed.
    pub stops: Vec<String>,
}

/// On-disk network format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkFile {
    #[serde(default)]
    pub name: String,
    pub stops: Vec<StopRecord>,
    pub routes: Vec<RouteRecord>,
}

/// Immutable stop and route data.
#[derive(Debug, Clone)]
pub struct NetworkModel {
    name: String,
    stops: Vec<Arc<Stop>>,
    routes: Vec<Arc<Route>>,
    stop_index: HashMap<StopId, usize>,
    route_index: HashMap<RouteId, usize>,
}

impl NetworkModel {
    /// Build a network from already-constructed parts.
    ///
    /// # Errors
    ///
    /// Returns `Err` on duplicate stop or route ids, or if a route visits a
    /// stop that is not in `stops` or differs from the stop of the same id.
    pub fn new(
        name: impl Into<String>,
        stops: Vec<Arc<Stop>>,
        routes: Vec<Route>,
    ) -> Result<Self, DomainError> {
        let mut stop_index = HashMap::with_capacity(stops.len());
        for (i, stop) in stops.iter().enumerate() {
            if stop_index.insert(stop.id.clone(), i).is_some() {
                return Err(DomainError::DuplicateStop(stop.id.clone()));
            }
        }

        let mut route_index = HashMap::with_capacity(routes.len());
        for (i, route) in routes.iter().enumerate() {
            for stop in route.stops() {
                let Some(&known) = stop_index.get(&stop.id) else {
                    return Err(DomainError::InvalidStopReference {
                        route: route.id().clone(),
                        stop: stop.id.clone(),
                    });
                };
                if !Arc::ptr_eq(stop, &stops[known]) && **stop != *stops[known] {
                    return Err(DomainError::MismatchedStop {
                        route: route.id().clone(),
                        stop: stop.id.clone(),
                    });
                }
            }
            if route_index.insert(route.id().clone(), i).is_some() {
                return Err(DomainError::DuplicateRoute(route.id().clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            stops,
            routes: routes.into_iter().map(Arc::new).collect(),
            stop_index,
            route_index,
        })
    }

    /// Build a network from its file representation.
    pub fn from_file(file: NetworkFile) -> Result<Self, NetworkError> {
        let mut stops = Vec::with_capacity(file.stops.len());
        for record in file.stops {
            let id = StopId::parse(&record.id)?;
            let location = GeoPoint::try_new(record.lat, record.lon)?;
            stops.push(Arc::new(Stop::new(id, record.name, location)));
        }

        let by_id: HashMap<&StopId, &Arc<Stop>> = stops.iter().map(|s| (&s.id, s)).collect();

        let mut routes = Vec::with_capacity(file.routes.len());
        for record in file.routes {
            let route_id = RouteId::new(record.id);
            let color = RouteColor::parse(&record.color)?;

            let mut route_stops = Vec::with_capacity(record.stops.len());
            for raw in &record.stops {
                let stop_id = StopId::parse(raw)?;
                let stop = by_id.get(&stop_id).ok_or_else(|| {
                    DomainError::InvalidStopReference {
                        route: route_id.clone(),
                        stop: stop_id.clone(),
                    }
                })?;
                route_stops.push(Arc::clone(stop));
            }

            routes.push(Route::new(route_id, record.name, route_stops, color)?);
        }

        let network = Self::new(file.name, stops, routes)?;
        info!(
            name = %network.name,
            stops = network.stops.len(),
            routes = network.routes.len(),
            "loaded transit network"
        );
        Ok(network)
    }

    /// Parse a network from JSON text.
    pub fn from_json(json: &str) -> Result<Self, NetworkError> {
        let file: NetworkFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a network from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, NetworkError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The BSD Link shuttle network bundled with this crate.
    pub fn bsd_link() -> Result<Self, NetworkError> {
        Self::from_json(BSD_LINK_JSON)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All stops, in file order.
    pub fn stops(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    /// All routes, in file order.
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }

    pub fn stop(&self, id: &StopId) -> Option<&Arc<Stop>> {
        self.stop_index.get(id).map(|&i| &self.stops[i])
    }

    pub fn route(&self, id: &RouteId) -> Option<&Arc<Route>> {
        self.route_index.get(id).map(|&i| &self.routes[i])
    }

    /// Routes that visit `stop` at least once.
    pub fn routes_serving<'a>(&'a self, stop: &'a StopId) -> impl Iterator<Item = &'a Arc<Route>> {
        self.routes.iter().filter(move |r| r.serves(stop))
    }
}
