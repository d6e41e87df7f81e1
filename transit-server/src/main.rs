use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::{error, info, warn};

use transit_server::cache::{CacheConfig, CachedMbtaClient};
use transit_server::catalog::TransitSource;
use transit_server::logging;
use transit_server::mbta::{MbtaClient, MbtaConfig, MockMbtaClient};
use transit_server::network::{NetworkConfig, parse_route_ids, parse_route_types};
use transit_server::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() {
    let log_dir = std::env::var("LOG_DIR").unwrap_or_else(|_| logging::DEFAULT_LOG_DIR.into());
    if let Some(path) = logging::init(&PathBuf::from(log_dir)) {
        info!(path = %path.display(), "Logging to file");
    }

    let config = network_config();
    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
        .parse()
        .expect("BIND_ADDR must be a socket address, e.g. 127.0.0.1:3000");

    // Use fixtures if a mock directory is given
    if let Ok(dir) = std::env::var("MBTA_MOCK_DIR") {
        info!(dir = %dir, "Using mock MBTA data");
        let client = MockMbtaClient::new(&dir).expect("Failed to load mock MBTA data");
        serve(client, config, addr).await;
    } else {
        let mut mbta_config = MbtaConfig::new();
        match std::env::var("MBTA_API_KEY") {
            Ok(key) => mbta_config = mbta_config.with_api_key(key),
            Err(_) => warn!("MBTA_API_KEY not set. Requests will be heavily rate limited."),
        }
        if let Ok(url) = std::env::var("MBTA_BASE_URL") {
            mbta_config = mbta_config.with_base_url(url);
        }

        let client = MbtaClient::new(mbta_config).expect("Failed to create MBTA client");
        let cached = CachedMbtaClient::new(client, &CacheConfig::default());
        serve(cached, config, addr).await;
    }
}

/// Route types and down lines from the environment.
fn network_config() -> NetworkConfig {
    let mut config = NetworkConfig::default();
    if let Ok(types) = std::env::var("ROUTE_TYPES") {
        let types = parse_route_types(&types).expect("ROUTE_TYPES must be comma-separated codes");
        config = config.with_route_types(types);
    }
    if let Ok(lines) = std::env::var("DOWN_LINES") {
        config = config.with_down_lines(parse_route_ids(&lines));
    }
    config
}

async fn serve<S: TransitSource + 'static>(source: S, config: NetworkConfig, addr: SocketAddr) {
    info!(
        route_types = ?config.route_types,
        down_lines = ?config.down_lines,
        "Loading network"
    );
    // Fail fast if the network cannot be loaded
    let state = match AppState::load(source, config).await {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "Failed to load network");
            std::process::exit(1);
        }
    };

    let app = create_router(state);

    info!("Transit server listening on http://{addr}");
    info!("  GET  /health               - Health check");
    info!("  GET  /routes               - All routes");
    info!("  GET  /routes/most-stops    - Route with the most stops");
    info!("  GET  /routes/fewest-stops  - Route with the fewest stops");
    info!("  GET  /routes/down          - Down lines");
    info!("  GET  /stations             - All stations");
    info!("  GET  /stations/transfers   - Transfer stations");
    info!("  GET  /connection           - Connection between two stations");
    info!("  POST /refresh              - Reload the network");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
    info!("Shut down");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
