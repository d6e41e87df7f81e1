//! In-memory transit source for unit tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::Mutex;

use crate::domain::{Direction, Route, RouteId, RouteType, Station};
use crate::mbta::MbtaError;

use super::TransitSource;

/// Serves routes and stations from memory and counts calls.
#[derive(Default)]
pub(crate) struct StaticSource {
    routes: Vec<(Route, BTreeSet<Station>)>,
    failing: HashMap<RouteId, fn() -> MbtaError>,
    /// Station sets swapped in after construction.
    replaced: Mutex<HashMap<RouteId, BTreeSet<Station>>>,
    calls: Mutex<usize>,
}

impl StaticSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a route serving the given station ids; each station is named
    /// after its id.
    pub(crate) fn with_route(mut self, id: &str, route_type: RouteType, stations: &[&str]) -> Self {
        let route = Route {
            id: RouteId::new(id),
            name: format!("{id} Line"),
            directions: vec![
                Direction {
                    name: "Outbound".into(),
                    destination: format!("{id} Outer"),
                },
                Direction {
                    name: "Inbound".into(),
                    destination: format!("{id} Inner"),
                },
            ],
            route_type,
        };
        let stations = stations.iter().map(|s| Station::new(*s, *s)).collect();
        self.routes.push((route, stations));
        self
    }

    /// Make station fetches for `id` fail.
    pub(crate) fn failing(mut self, id: &str, error: fn() -> MbtaError) -> Self {
        self.failing.insert(RouteId::new(id), error);
        self
    }

    /// Change the stations `id` serves from now on.
    pub(crate) fn replace_stations(&self, id: &str, stations: &[&str]) {
        let stations = stations.iter().map(|s| Station::new(*s, *s)).collect();
        self.replaced
            .lock()
            .unwrap()
            .insert(RouteId::new(id), stations);
    }

    pub(crate) fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

impl TransitSource for StaticSource {
    async fn fetch_routes(&self, route_types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self
            .routes
            .iter()
            .filter(|(r, _)| route_types.is_empty() || route_types.contains(&r.route_type))
            .map(|(r, _)| r.clone())
            .collect())
    }

    async fn fetch_route_stations(&self, route: &Route) -> Result<BTreeSet<Station>, MbtaError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(error) = self.failing.get(&route.id) {
            return Err(error());
        }
        if let Some(stations) = self.replaced.lock().unwrap().get(&route.id) {
            return Ok(stations.clone());
        }
        Ok(self
            .routes
            .iter()
            .find(|(r, _)| r.id == route.id)
            .map(|(_, s)| s.clone())
            .unwrap_or_default())
    }
}
