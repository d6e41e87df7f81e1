//! MBTA v3 API client.
//!
//! This module provides an HTTP client for the MBTA's public JSON:API
//! service, which publishes routes, route patterns, trips and stops for
//! the Boston-area transit network.
//!
//! Key characteristics of the API:
//! - Keyless clients are throttled hard (~20 requests/minute); throttled
//!   compound documents lose their `included` section
//! - Stops are per-platform; each references its parent station
//! - Route patterns name one representative trip, which is how a route's
//!   branches are enumerated without listing every trip

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use convert::{convert_route, convert_route_stations, convert_stop};
pub use error::MbtaError;
pub use mock::MockMbtaClient;
pub use types::{
    IncludedResource, Linkage, RouteListResponse, RouteResource, RouteStationsResponse,
};
