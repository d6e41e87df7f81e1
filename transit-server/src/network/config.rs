//! Network configuration.

use std::collections::BTreeSet;

use crate::domain::{RouteId, RouteType};

/// Which routes make up the network and which are out of service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Route types to fetch. Empty means every route.
    pub route_types: Vec<RouteType>,

    /// Routes treated as unusable for the session.
    pub down_lines: BTreeSet<RouteId>,
}

/// Error returned when a configuration list cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route type code: {0:?}")]
pub struct InvalidRouteType(pub String);

impl NetworkConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(route_types: Vec<RouteType>, down_lines: BTreeSet<RouteId>) -> Self {
        Self {
            route_types,
            down_lines,
        }
    }

    /// Replace the down lines.
    pub fn with_down_lines<I, T>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RouteId>,
    {
        self.down_lines = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the route types.
    pub fn with_route_types(mut self, route_types: Vec<RouteType>) -> Self {
        self.route_types = route_types;
        self
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            route_types: RouteType::SUBWAY.to_vec(),
            down_lines: BTreeSet::new(),
        }
    }
}

/// Parse a comma-separated list of route type codes, e.g. `"0,1"`.
pub fn parse_route_types(s: &str) -> Result<Vec<RouteType>, InvalidRouteType> {
    split_list(s)
        .map(|code| {
            code.parse::<u8>()
                .map(RouteType)
                .map_err(|_| InvalidRouteType(code.to_string()))
        })
        .collect()
}

/// Parse a comma-separated list of route ids, e.g. `"Orange,Green-B"`.
pub fn parse_route_ids(s: &str) -> BTreeSet<RouteId> {
    split_list(s).map(RouteId::new).collect()
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|part| !part.is_empty())
}
