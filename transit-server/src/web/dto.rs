//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{Direction, RouteEntry, RouteId, StationId};
use crate::network::{Connection, Network, StationIndexEntry};

/// A route in listings.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Route id (e.g. "Red")
    pub id: RouteId,

    /// Display name (e.g. "Red Line")
    pub name: String,

    /// MBTA route type code
    pub route_type: u8,

    /// Route type label (e.g. "Heavy Rail")
    pub route_type_name: String,

    /// Travel directions and their termini
    pub directions: Vec<Direction>,

    /// Number of distinct stations served
    pub num_stops: usize,
}

impl RouteResult {
    pub fn from_entry(entry: &RouteEntry) -> Self {
        Self {
            id: entry.route.id.clone(),
            name: entry.route.name.clone(),
            route_type: entry.route.route_type.code(),
            route_type_name: entry.route.route_type.to_string(),
            directions: entry.route.directions.clone(),
            num_stops: entry.num_stops(),
        }
    }
}

/// Response listing routes.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

/// A route reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRef {
    pub id: RouteId,
    pub name: String,
}

impl LineRef {
    pub fn new(network: &Network, id: &RouteId) -> Self {
        Self {
            id: id.clone(),
            name: network.route_name(id).to_string(),
        }
    }
}

/// A station reference with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StationRef {
    pub id: StationId,
    pub name: String,
}

impl StationRef {
    pub fn new(network: &Network, id: &StationId) -> Self {
        let name = network
            .stations()
            .get(id)
            .map(|e| e.station.name.clone())
            .unwrap_or_else(|| id.to_string());
        Self {
            id: id.clone(),
            name,
        }
    }
}

/// A station and the routes serving it.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub id: StationId,
    pub name: String,
    pub lines: Vec<LineRef>,
}

impl StationResult {
    pub fn from_entry(network: &Network, entry: &StationIndexEntry) -> Self {
        Self {
            id: entry.station.id.clone(),
            name: entry.station.name.clone(),
            lines: entry.lines.iter().map(|l| LineRef::new(network, l)).collect(),
        }
    }

    /// e.g. "Park Street connects the routes: Green Line B, Red Line"
    pub fn connects_description(&self) -> String {
        let names: Vec<&str> = self.lines.iter().map(|l| l.name.as_str()).collect();
        format!("{} connects the routes: {}", self.name, names.join(", "))
    }
}

/// Response listing stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// A transfer station with a readable summary.
#[derive(Debug, Serialize)]
pub struct TransferStationResult {
    #[serde(flatten)]
    pub station: StationResult,
    pub description: String,
}

/// Response listing transfer stations.
#[derive(Debug, Serialize)]
pub struct TransferStationsResponse {
    pub stations: Vec<TransferStationResult>,
}

/// Request for a connection between two stations.
#[derive(Debug, Deserialize)]
pub struct ConnectionRequest {
    /// Origin station id (e.g. "place-alfcl")
    pub origin: String,

    /// Destination station id
    pub destination: String,
}

/// A found connection.
#[derive(Debug, Serialize)]
pub struct ConnectionResponse {
    pub origin: StationRef,
    pub destination: StationRef,

    /// Routes to ride, in order
    pub lines: Vec<LineRef>,

    /// Where to leave each route; the last is the destination
    pub transfer_stations: Vec<StationRef>,

    /// Number of changes
    pub transfers: usize,

    /// Riding directions as a sentence
    pub directions: String,
}

impl ConnectionResponse {
    pub fn new(
        network: &Network,
        origin: &StationIndexEntry,
        destination: &StationIndexEntry,
        connection: &Connection,
    ) -> Self {
        Self {
            origin: StationRef::new(network, origin.id()),
            destination: StationRef::new(network, destination.id()),
            lines: connection
                .lines
                .iter()
                .map(|l| LineRef::new(network, l))
                .collect(),
            transfer_stations: connection
                .transfer_stations
                .iter()
                .map(|s| StationRef::new(network, s))
                .collect(),
            transfers: connection.transfer_count(),
            directions: network.directions(origin, connection),
        }
    }
}

/// Response listing down lines.
#[derive(Debug, Serialize)]
pub struct DownLinesResponse {
    pub down_lines: Vec<LineRef>,
}

/// Summary of a completed refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub routes: usize,
    pub stations: usize,
    pub transfer_stations: usize,
}

impl RefreshResponse {
    pub fn from_network(network: &Network) -> Self {
        Self {
            routes: network.routes().len(),
            stations: network.stations().len(),
            transfer_stations: network.transfer_stations().len(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::test_support::entry;
    use std::collections::BTreeSet;

    fn network() -> Network {
        let routes = [entry("Red", &["A", "B", "C"]), entry("Blue", &["C", "D"])]
            .into_iter()
            .map(|e| (e.id().clone(), e))
            .collect();
        Network::build(routes, &BTreeSet::new())
    }

    #[test]
    fn transfer_station_description() {
        let net = network();
        let c = net.stations().get(&StationId::new("C")).unwrap();
        let result = StationResult::from_entry(&net, c);
        assert_eq!(
            result.connects_description(),
            "C connects the routes: Blue Line, Red Line"
        );
    }

    #[test]
    fn connection_response_names_everything() {
        let net = network();
        let a = net.stations().get(&StationId::new("A")).unwrap();
        let d = net.stations().get(&StationId::new("D")).unwrap();
        let connection = net.find_connection(a, d).unwrap();

        let response = ConnectionResponse::new(&net, a, d, &connection);

        assert_eq!(response.transfers, 1);
        assert_eq!(
            response.lines.iter().map(|l| l.name.as_str()).collect::<Vec<_>>(),
            vec!["Red Line", "Blue Line"]
        );
        assert_eq!(response.transfer_stations.last().unwrap().id.as_str(), "D");
    }

    #[test]
    fn connection_response_serializes() {
        let net = network();
        let a = net.stations().get(&StationId::new("A")).unwrap();
        let b = net.stations().get(&StationId::new("B")).unwrap();
        let connection = net.find_connection(a, b).unwrap();

        let json = serde_json::to_value(ConnectionResponse::new(&net, a, b, &connection)).unwrap();

        assert_eq!(json["lines"][0]["id"], "Red");
        assert_eq!(json["transfer_stations"][0]["id"], "B");
        assert_eq!(json["directions"], "From A take the Red Line to B.");
    }
}
