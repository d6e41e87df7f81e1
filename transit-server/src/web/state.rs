//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::catalog::TransitSource;
use crate::mbta::MbtaError;
use crate::network::{Network, NetworkConfig};

/// Shared application state.
///
/// Handlers read the current network snapshot; a refresh builds a new one
/// from the source and swaps it in only once it is complete.
pub struct AppState<S> {
    /// Source of routes and stations
    pub source: Arc<S>,

    /// Route types and down lines to build with
    pub config: Arc<NetworkConfig>,

    network: Arc<RwLock<Arc<Network>>>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            config: Arc::clone(&self.config),
            network: Arc::clone(&self.network),
        }
    }
}

impl<S: TransitSource> AppState<S> {
    /// Create a new app state around an initial snapshot.
    pub fn new(source: S, config: NetworkConfig, network: Network) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
            network: Arc::new(RwLock::new(Arc::new(network))),
        }
    }

    /// Fetch the first snapshot and create the app state.
    pub async fn load(source: S, config: NetworkConfig) -> Result<Self, MbtaError> {
        let network = Network::fetch(&source, &config).await?;
        Ok(Self::new(source, config, network))
    }

    /// The current snapshot.
    pub async fn network(&self) -> Arc<Network> {
        Arc::clone(&*self.network.read().await)
    }

    /// Rebuild the snapshot from fresh upstream data.
    ///
    /// On failure the previous snapshot stays in place.
    pub async fn refresh(&self) -> Result<Arc<Network>, MbtaError> {
        self.source.invalidate();
        let network = match Network::fetch(&*self.source, &self.config).await {
            Ok(network) => Arc::new(network),
            Err(e) => {
                warn!(error = %e, "Refresh failed, keeping previous network");
                return Err(e);
            }
        };

        *self.network.write().await = Arc::clone(&network);
        info!(routes = network.routes().len(), "Network refreshed");
        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheConfig, CachedSource};
    use crate::catalog::test_support::StaticSource;
    use crate::domain::{RouteType, StationId};

    #[tokio::test]
    async fn refresh_replaces_snapshot() {
        let source = StaticSource::new().with_route("Red", RouteType::HEAVY_RAIL, &["A", "B"]);
        let state = AppState::load(source, NetworkConfig::default())
            .await
            .unwrap();
        let before = state.network().await;

        let after = state.refresh().await.unwrap();

        assert!(!Arc::ptr_eq(&before, &after));
        assert!(Arc::ptr_eq(&after, &state.network().await));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_snapshot() {
        let source = StaticSource::new()
            .with_route("Red", RouteType::HEAVY_RAIL, &["A", "B"])
            .with_route("Blue", RouteType::HEAVY_RAIL, &["B", "C"]);
        let network = Network::fetch(&source, &NetworkConfig::default())
            .await
            .unwrap();
        let failing = StaticSource::new()
            .with_route("Red", RouteType::HEAVY_RAIL, &["A", "B"])
            .failing("Red", || MbtaError::RateLimited);
        let state = AppState::new(failing, NetworkConfig::default(), network);

        let err = state.refresh().await.unwrap_err();

        assert!(err.is_retryable());
        assert_eq!(state.network().await.routes().len(), 2);
    }

    #[tokio::test]
    async fn refresh_picks_up_changed_stations_behind_cache() {
        let source = CachedSource::new(
            StaticSource::new().with_route("Red", RouteType::HEAVY_RAIL, &["A", "B"]),
            &CacheConfig::default(),
        );
        let state = AppState::load(source, NetworkConfig::default())
            .await
            .unwrap();
        state.source.source().replace_stations("Red", &["A", "B", "C"]);

        let network = state.refresh().await.unwrap();

        assert_eq!(network.stations().len(), 3);
        assert!(network.stations().contains(&StationId::new("C")));
    }
}
