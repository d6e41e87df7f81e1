//! The upstream data source abstraction.

use std::collections::BTreeSet;
use std::future::Future;

use crate::domain::{Route, RouteType, Station};
use crate::mbta::MbtaError;

/// Trait for answering the two queries a refresh needs.
///
/// This abstraction allows the catalog and resolver to run against the
/// live API, a cache in front of it, or fixture files.
pub trait TransitSource: Send + Sync {
    /// List routes of the given types; every route when `route_types` is
    /// empty.
    fn fetch_routes(
        &self,
        route_types: &[RouteType],
    ) -> impl Future<Output = Result<Vec<Route>, MbtaError>> + Send;

    /// All stations `route` serves, deduplicated by parent station.
    fn fetch_route_stations(
        &self,
        route: &Route,
    ) -> impl Future<Output = Result<BTreeSet<Station>, MbtaError>> + Send;

    /// Forget any remembered answers, so the next queries go upstream.
    fn invalidate(&self) {}
}
