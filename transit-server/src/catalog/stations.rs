//! Station resolution for routes.

use std::collections::{BTreeMap, BTreeSet};

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::domain::{Route, RouteEntry, RouteId, Station};
use crate::mbta::MbtaError;

use super::source::TransitSource;

/// Resolves the stations each route serves.
pub struct StationResolver<'a, S: TransitSource> {
    source: &'a S,
}

impl<'a, S: TransitSource> StationResolver<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// All stations `route` serves, deduplicated by parent station.
    pub async fn fetch_stations(&self, route: &Route) -> Result<BTreeSet<Station>, MbtaError> {
        let stations = self.source.fetch_route_stations(route).await?;
        debug!(route = %route.id, stations = stations.len(), "Resolved stations");
        Ok(stations)
    }

    /// Resolve stations for every entry.
    ///
    /// Fetches run concurrently; the source bounds how many are in flight.
    /// The first failure aborts the whole resolution, so callers never see
    /// a partially resolved map.
    pub async fn resolve_all(
        &self,
        entries: BTreeMap<RouteId, RouteEntry>,
    ) -> Result<BTreeMap<RouteId, RouteEntry>, MbtaError> {
        let fetches = entries.into_values().map(|entry| async move {
            let stations = self.fetch_stations(&entry.route).await?;
            Ok::<_, MbtaError>(RouteEntry::with_stations(entry.route, stations))
        });

        let resolved: BTreeMap<RouteId, RouteEntry> = try_join_all(fetches)
            .await?
            .into_iter()
            .map(|entry| (entry.id().clone(), entry))
            .collect();

        let total: usize = resolved.values().map(RouteEntry::num_stops).sum();
        info!(routes = resolved.len(), stops = total, "Resolved route stations");
        Ok(resolved)
    }
}
