//! MBTA v3 API HTTP client.
//!
//! Provides async methods for the two queries the network needs: the route
//! listing and a route's stations. Handles authentication, concurrency
//! limiting, and conversion to domain types.

use std::collections::BTreeSet;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::catalog::TransitSource;
use crate::domain::{Route, RouteId, RouteType, Station};

use super::convert::{convert_route, convert_route_stations};
use super::error::MbtaError;
use super::types::{RouteListResponse, RouteStationsResponse};

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Relationship path that pulls patterns, their representative trips and
/// the trips' stops into one compound document.
const STATIONS_INCLUDE: &str = "route_patterns.representative_trip.stops";

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key for the `x-api-key` header. Without one the API allows
    /// roughly 20 requests per minute.
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config for anonymous access.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Authenticate with an API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// MBTA v3 API client.
///
/// Uses a semaphore to limit concurrent requests so a refresh fanning out
/// over every route does not trip the rate limiter.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();

        if let Some(key) = &config.api_key {
            let value = HeaderValue::from_str(key).map_err(|_| MbtaError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
            headers.insert("x-api-key", value);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    async fn permit(&self) -> Result<tokio::sync::SemaphorePermit<'_>, MbtaError> {
        self.semaphore.acquire().await.map_err(|_| MbtaError::Api {
            status: 0,
            message: "Semaphore closed".to_string(),
        })
    }

    /// List routes, optionally filtered by type.
    ///
    /// An empty `route_types` lists every route. Any error status, and an
    /// empty result, are reported as [`MbtaError::InvalidFilter`].
    pub async fn get_routes(&self, route_types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        let _permit = self.permit().await?;

        let url = format!("{}/routes", self.base_url);
        let mut request = self.http.get(&url);
        if let Some(filter) = type_filter(route_types) {
            request = request.query(&[("filter[type]", filter)]);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::InvalidFilter {
                route_types: route_types.to_vec(),
                reason: format!("API error {}: {}", status.as_u16(), truncate(&body)),
            });
        }

        let body = response.text().await?;
        let listing: RouteListResponse =
            serde_json::from_str(&body).map_err(|e| MbtaError::Json {
                message: e.to_string(),
                body: Some(truncate(&body)),
            })?;

        routes_from_listing(&listing, route_types)
    }

    /// Fetch every station a route serves.
    pub async fn get_route_stations(
        &self,
        route_id: &RouteId,
    ) -> Result<BTreeSet<Station>, MbtaError> {
        let _permit = self.permit().await?;

        let url = format!("{}/routes/{}", self.base_url, route_id.as_str());
        let response = self
            .http
            .get(&url)
            .query(&[("include", STATIONS_INCLUDE)])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        let document: RouteStationsResponse =
            serde_json::from_str(&body).map_err(|e| MbtaError::Json {
                message: e.to_string(),
                body: Some(truncate(&body)),
            })?;

        let stations = convert_route_stations(&document)?;
        debug!(route = %route_id, stations = stations.len(), "Fetched route stations");
        Ok(stations)
    }
}

impl TransitSource for MbtaClient {
    async fn fetch_routes(&self, route_types: &[RouteType]) -> Result<Vec<Route>, MbtaError> {
        self.get_routes(route_types).await
    }

    async fn fetch_route_stations(&self, route: &Route) -> Result<BTreeSet<Station>, MbtaError> {
        self.get_route_stations(&route.id).await
    }
}

/// The `filter[type]` value for a set of route types, if any.
pub(crate) fn type_filter(route_types: &[RouteType]) -> Option<String> {
    if route_types.is_empty() {
        return None;
    }
    let codes: Vec<String> = route_types.iter().map(|t| t.code().to_string()).collect();
    Some(codes.join(","))
}

/// Convert a route listing, treating an empty listing as a bad filter.
pub(crate) fn routes_from_listing(
    listing: &RouteListResponse,
    route_types: &[RouteType],
) -> Result<Vec<Route>, MbtaError> {
    if listing.data.is_empty() {
        return Err(MbtaError::InvalidFilter {
            route_types: route_types.to_vec(),
            reason: "no routes matched".to_string(),
        });
    }
    Ok(listing.data.iter().map(convert_route).collect())
}

fn truncate(body: &str) -> String {
    body.chars().take(500).collect()
}
