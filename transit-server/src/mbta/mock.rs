//! Mock MBTA client for testing without API access.
//!
//! Loads API responses from JSON files and serves them as if they were
//! live responses:
//!
//! ```text
//! data/mock/
//!   routes.json          body of GET /routes
//!   routes/Red.json      body of GET /routes/Red?include=...
//!   routes/Blue.json
//! ```

use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::Arc;

use crate::catalog::TransitSource;
use crate::domain::{Route, RouteType, Station};

use super::client::routes_from_listing;
use super::convert::convert_route_stations;
use super::error::MbtaError;
use super::types::{RouteListResponse, RouteStationsResponse};

/// Mock MBTA client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockMbtaClient {
    routes: Arc<RouteListResponse>,
    /// Compound documents keyed by route id.
    stations: Arc<HashMap<String, RouteStationsResponse>>,
}

fn fixture_error(message: String) -> MbtaError {
    MbtaError::Fixture { message }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, MbtaError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| fixture_error(format!("Failed to read {:?}: {}", path, e)))?;
    serde_json::from_str(&json)
        .map_err(|e| fixture_error(format!("Failed to parse {:?}: {}", path, e)))
}

impl MockMbtaClient {
    /// Create a new mock client by loading JSON files from a directory.
    ///
    /// Expects `routes.json` plus `routes/{route_id}.json` for each route
    /// whose stations will be requested.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MbtaError> {
        let data_dir = data_dir.as_ref();
        let routes: RouteListResponse = read_json(&data_dir.join("routes.json"))?;

        let routes_dir = data_dir.join("routes");
        let mut stations = HashMap::new();

        let entries = std::fs::read_dir(&routes_dir).map_err(|e| {
            fixture_error(format!("Failed to read mock route directory {:?}: {}", routes_dir, e))
        })?;

        for entry in entries {
            let entry = entry
                .map_err(|e| fixture_error(format!("Failed to read directory entry: {}", e)))?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // "Green-B.json" -> "Green-B"
            let route_id = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| fixture_error(format!("Invalid filename: {:?}", path)))?
                .to_string();

            stations.insert(route_id, read_json(&path)?);
        }

        Ok(Self {
            routes: Arc::new(routes),
            stations: Arc::new(stations),
        })
    }

    /// Route ids that have a station document.
    pub fn available_routes(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.stations.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl TransitSource for MockMbtaClient {
    /// Applies the type filter locally, as the API would.
    async fn fetch_routes(&self, route_types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        let matching = RouteListResponse {
            data: self
                .routes
                .data
                .iter()
                .filter(|r| {
                    route_types.is_empty() || route_types.contains(&RouteType(r.attributes.route_type))
                })
                .cloned()
                .collect(),
        };
        routes_from_listing(&matching, route_types)
    }

    async fn fetch_route_stations(&self, route: &Route) -> Result<BTreeSet<Station>, MbtaError> {
        let document = self
            .stations
            .get(route.id.as_str())
            .ok_or_else(|| MbtaError::Api {
                status: 404,
                message: format!(
                    "No mock data for route {}. Available: {:?}",
                    route.id,
                    self.available_routes()
                ),
            })?;
        convert_route_stations(document)
    }
}
