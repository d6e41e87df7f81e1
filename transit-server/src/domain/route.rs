//! Route types.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::Station;

/// Identifier of a route (e.g. `Red`, `Green-B`).
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteId(String);

impl RouteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RouteId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RouteId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// MBTA route category code.
///
/// The API reports this as a bare integer following the GTFS `route_type`
/// values. Codes outside the named constants are kept as-is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RouteType(pub u8);

impl RouteType {
    pub const LIGHT_RAIL: RouteType = RouteType(0);
    pub const HEAVY_RAIL: RouteType = RouteType(1);
    pub const COMMUTER_RAIL: RouteType = RouteType(2);
    pub const BUS: RouteType = RouteType(3);
    pub const FERRY: RouteType = RouteType(4);

    /// The subway: light rail and heavy rail.
    pub const SUBWAY: [RouteType; 2] = [RouteType::LIGHT_RAIL, RouteType::HEAVY_RAIL];

    pub fn code(self) -> u8 {
        self.0
    }

    /// Human-readable category, if the code is one of the known ones.
    pub fn label(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("Light Rail"),
            1 => Some("Heavy Rail"),
            2 => Some("Commuter Rail"),
            3 => Some("Bus"),
            4 => Some("Ferry"),
            _ => None,
        }
    }
}

impl fmt::Debug for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteType({})", self.0)
    }
}

impl fmt::Display for RouteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.label() {
            Some(label) => f.write_str(label),
            None => write!(f, "type {}", self.0),
        }
    }
}

/// One travel direction of a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Direction {
    /// Direction name, e.g. "South".
    pub name: String,
    /// Terminus in that direction, e.g. "Ashmont/Braintree".
    pub destination: String,
}

/// A transit line as reported by the route listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub id: RouteId,
    pub name: String,
    pub directions: Vec<Direction>,
    pub route_type: RouteType,
}

/// A route together with the stations it serves, built during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub route: Route,
    pub stations: BTreeSet<Station>,
}

impl RouteEntry {
    /// An entry whose stations have not been resolved yet.
    pub fn new(route: Route) -> Self {
        Self {
            route,
            stations: BTreeSet::new(),
        }
    }

    pub fn with_stations(route: Route, stations: BTreeSet<Station>) -> Self {
        Self { route, stations }
    }

    pub fn id(&self) -> &RouteId {
        &self.route.id
    }

    /// Number of distinct stations the route serves.
    pub fn num_stops(&self) -> usize {
        self.stations.len()
    }
}
