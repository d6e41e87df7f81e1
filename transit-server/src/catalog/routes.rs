//! Route listing.

use std::collections::BTreeMap;

use tracing::info;

use crate::domain::{RouteEntry, RouteId, RouteType};
use crate::mbta::MbtaError;

use super::source::TransitSource;

/// Fetches route metadata for a set of route-type filters.
pub struct RouteCatalog<'a, S: TransitSource> {
    source: &'a S,
}

impl<'a, S: TransitSource> RouteCatalog<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Fetch routes keyed by id, each with an empty station set.
    ///
    /// An empty `route_types` fetches every route. A filter that matches
    /// nothing fails with [`MbtaError::InvalidFilter`] rather than yielding
    /// an empty map.
    pub async fn fetch_routes(
        &self,
        route_types: &[RouteType],
    ) -> Result<BTreeMap<RouteId, RouteEntry>, MbtaError> {
        let routes = self.source.fetch_routes(route_types).await?;

        if routes.is_empty() {
            return Err(MbtaError::InvalidFilter {
                route_types: route_types.to_vec(),
                reason: "no routes matched".to_string(),
            });
        }

        let entries: BTreeMap<RouteId, RouteEntry> = routes
            .into_iter()
            .map(|route| (route.id.clone(), RouteEntry::new(route)))
            .collect();

        info!(routes = entries.len(), ?route_types, "Fetched route catalog");
        Ok(entries)
    }
}
