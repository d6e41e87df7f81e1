//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{error, info, warn};

use crate::catalog::TransitSource;
use crate::domain::{RouteEntry, StationId};
use crate::mbta::MbtaError;
use crate::network::{Network, StationIndexEntry};

use super::dto::*;
use super::state::AppState;

pub(crate) const INVALID_ORIGIN: &str = "Origin ID invalid, please provide a valid origin ID.";
pub(crate) const INVALID_DESTINATION: &str =
    "Destination ID invalid, please provide a valid destination ID.";

/// Create the application router.
pub fn create_router<S: TransitSource + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/routes", get(list_routes::<S>))
        .route("/routes/most-stops", get(most_stops::<S>))
        .route("/routes/fewest-stops", get(fewest_stops::<S>))
        .route("/routes/down", get(down_lines::<S>))
        .route("/stations", get(list_stations::<S>))
        .route("/stations/transfers", get(transfer_stations::<S>))
        .route("/connection", get(connection::<S>))
        .route("/refresh", post(refresh::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// All routes, ordered by id.
async fn list_routes<S: TransitSource>(State(state): State<AppState<S>>) -> Json<RoutesResponse> {
    let network = state.network().await;
    let routes = network
        .routes()
        .values()
        .map(RouteResult::from_entry)
        .collect();
    Json(RoutesResponse { routes })
}

async fn most_stops<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<RouteResult>, AppError> {
    let network = state.network().await;
    extreme_route(network.most_stops())
}

async fn fewest_stops<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<RouteResult>, AppError> {
    let network = state.network().await;
    extreme_route(network.fewest_stops())
}

fn extreme_route(entry: Option<&RouteEntry>) -> Result<Json<RouteResult>, AppError> {
    entry
        .map(|e| Json(RouteResult::from_entry(e)))
        .ok_or_else(|| AppError::NotFound {
            message: "No routes loaded".to_string(),
        })
}

/// Lines configured as out of service.
async fn down_lines<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Json<DownLinesResponse> {
    let network = state.network().await;
    let down_lines = network
        .down_lines()
        .iter()
        .map(|id| LineRef::new(&network, id))
        .collect();
    Json(DownLinesResponse { down_lines })
}

/// Every station id and name, for choosing an origin and destination.
async fn list_stations<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Json<StationsResponse> {
    let network = state.network().await;
    let stations = network
        .stations()
        .iter()
        .map(|e| StationResult::from_entry(&network, e))
        .collect();
    Json(StationsResponse { stations })
}

/// Stations served by more than one route.
async fn transfer_stations<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Json<TransferStationsResponse> {
    let network = state.network().await;
    let stations = network
        .transfer_stations()
        .iter()
        .map(|e| {
            let station = StationResult::from_entry(&network, e);
            let description = station.connects_description();
            TransferStationResult {
                station,
                description,
            }
        })
        .collect();
    Json(TransferStationsResponse { stations })
}

/// Routes to ride between two stations.
async fn connection<S: TransitSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<ConnectionRequest>,
) -> Result<Json<ConnectionResponse>, AppError> {
    let network = state.network().await;
    let origin = lookup_station(&network, &req.origin, INVALID_ORIGIN)?;
    let destination = lookup_station(&network, &req.destination, INVALID_DESTINATION)?;

    match network.find_connection(origin, destination) {
        Ok(connection) => {
            info!(
                origin = %origin.id(),
                destination = %destination.id(),
                transfers = connection.transfer_count(),
                "Found connection"
            );
            Ok(Json(ConnectionResponse::new(
                &network,
                origin,
                destination,
                &connection,
            )))
        }
        Err(e) => {
            warn!(error = %e, "No connection");
            Err(AppError::NotFound {
                message: no_connection_message(&network),
            })
        }
    }
}

fn lookup_station<'a>(
    network: &'a Network,
    id: &str,
    invalid: &str,
) -> Result<&'a StationIndexEntry, AppError> {
    network
        .stations()
        .get(&StationId::new(id.trim()))
        .ok_or_else(|| AppError::BadRequest {
            message: invalid.to_string(),
        })
}

/// e.g. "Cannot find route transfer. The following lines are down: Orange Line"
fn no_connection_message(network: &Network) -> String {
    let down: Vec<&str> = network
        .down_lines()
        .iter()
        .map(|id| network.route_name(id))
        .collect();
    if down.is_empty() {
        "Cannot find route transfer. No lines are down.".to_string()
    } else {
        format!(
            "Cannot find route transfer. The following lines are down: {}",
            down.join(", ")
        )
    }
}

/// Rebuild the network from the source.
async fn refresh<S: TransitSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<RefreshResponse>, AppError> {
    let network = state.refresh().await?;
    Ok(Json(RefreshResponse::from_network(&network)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<MbtaError> for AppError {
    fn from(e: MbtaError) -> Self {
        if e.is_retryable() {
            AppError::Unavailable {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, "{message}");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
