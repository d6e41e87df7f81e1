//! Caching layer for route station lookups.
//!
//! Resolving stations costs one compound-document request per route, and
//! unkeyed clients are throttled at roughly 20 requests a minute. Caching
//! each route's stations for a short TTL lets repeated refreshes reuse
//! recent answers instead of tripping the limiter. The route listing is a
//! single request and always goes upstream.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::catalog::TransitSource;
use crate::domain::{Route, RouteId, RouteType, Station};
use crate::mbta::{MbtaClient, MbtaError};

/// Cached station set entry.
type StationsEntry = Arc<BTreeSet<Station>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 1000,
        }
    }
}

/// A transit source with cached station lookups.
pub struct CachedSource<S> {
    source: S,
    /// Stations keyed by route id.
    stations: MokaCache<RouteId, StationsEntry>,
}

/// The live MBTA client with caching.
pub type CachedMbtaClient = CachedSource<MbtaClient>;

impl<S: TransitSource> CachedSource<S> {
    /// Create a new cached source.
    pub fn new(source: S, config: &CacheConfig) -> Self {
        let stations = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { source, stations }
    }

    /// Access the underlying source for operations that bypass cache.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get cache statistics.
    pub fn cache_entry_count(&self) -> u64 {
        self.stations.entry_count()
    }
}

impl<S: TransitSource> TransitSource for CachedSource<S> {
    async fn fetch_routes(&self, route_types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        self.source.fetch_routes(route_types).await
    }

    /// Only successful lookups are cached.
    async fn fetch_route_stations(&self, route: &Route) -> Result<BTreeSet<Station>, MbtaError> {
        if let Some(cached) = self.stations.get(&route.id).await {
            trace!(route = %route.id, "Station cache hit");
            return Ok((*cached).clone());
        }

        let stations = self.source.fetch_route_stations(route).await?;
        self.stations
            .insert(route.id.clone(), Arc::new(stations.clone()))
            .await;

        Ok(stations)
    }

    fn invalidate(&self) {
        self.stations.invalidate_all();
        self.source.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::test_support::StaticSource;

    fn source() -> StaticSource {
        StaticSource::new()
            .with_route("Red", RouteType::HEAVY_RAIL, &["A", "B"])
            .with_route("Blue", RouteType::HEAVY_RAIL, &["B", "C"])
            .failing("Orange", || MbtaError::RateLimited)
            .with_route("Orange", RouteType::HEAVY_RAIL, &["C"])
    }

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(60));
        assert_eq!(config.max_capacity, 1000);
    }

    #[tokio::test]
    async fn second_lookup_hits_cache() {
        let cached = CachedSource::new(source(), &CacheConfig::default());
        let routes = cached.fetch_routes(&[]).await.unwrap();
        let red = routes.iter().find(|r| r.id.as_str() == "Red").unwrap();

        let first = cached.fetch_route_stations(red).await.unwrap();
        let second = cached.fetch_route_stations(red).await.unwrap();

        assert_eq!(first, second);
        // Listing plus a single upstream station fetch
        assert_eq!(cached.source().call_count(), 2);
        cached.stations.run_pending_tasks().await;
        assert_eq!(cached.cache_entry_count(), 1);
    }

    #[tokio::test]
    async fn route_listing_is_not_cached() {
        let cached = CachedSource::new(source(), &CacheConfig::default());
        cached.fetch_routes(&[]).await.unwrap();
        cached.fetch_routes(&[]).await.unwrap();
        assert_eq!(cached.source().call_count(), 2);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let cached = CachedSource::new(source(), &CacheConfig::default());
        let routes = cached.fetch_routes(&[]).await.unwrap();
        let orange = routes.iter().find(|r| r.id.as_str() == "Orange").unwrap();

        assert!(cached.fetch_route_stations(orange).await.is_err());
        assert!(cached.fetch_route_stations(orange).await.is_err());
        assert_eq!(cached.source().call_count(), 3);
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let cached = CachedSource::new(source(), &CacheConfig::default());
        let routes = cached.fetch_routes(&[]).await.unwrap();
        let blue = routes.iter().find(|r| r.id.as_str() == "Blue").unwrap();

        cached.fetch_route_stations(blue).await.unwrap();
        cached.invalidate();
        cached.fetch_route_stations(blue).await.unwrap();

        assert_eq!(cached.source().call_count(), 3);
    }
}
