//! One consistent view of the network.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use crate::catalog::{RouteCatalog, StationResolver, TransitSource};
use crate::domain::{RouteEntry, RouteId};
use crate::mbta::MbtaError;

use super::config::NetworkConfig;
use super::index::{StationIndex, StationIndexEntry, TransferStations};
use super::path::{Connection, TransferRouteError, find_connection};
use super::transfers::TransferIndex;

/// The routes of one refresh and everything derived from them.
///
/// Built in one go and never modified afterwards; a refresh builds a new
/// `Network` and replaces the old one.
#[derive(Debug, Clone)]
pub struct Network {
    routes: BTreeMap<RouteId, RouteEntry>,
    stations: StationIndex,
    transfer_stations: TransferStations,
    transfers: TransferIndex,
}

impl Network {
    /// Derive the station and transfer indexes from resolved routes.
    pub fn build(routes: BTreeMap<RouteId, RouteEntry>, down_lines: &BTreeSet<RouteId>) -> Self {
        let stations = StationIndex::build(routes.values());
        let transfer_stations = TransferStations::filter(&stations);
        let transfers = TransferIndex::build(&transfer_stations, down_lines);

        Self {
            routes,
            stations,
            transfer_stations,
            transfers,
        }
    }

    /// Fetch routes and their stations, then build the network.
    pub async fn fetch<S: TransitSource>(
        source: &S,
        config: &NetworkConfig,
    ) -> Result<Self, MbtaError> {
        let entries = RouteCatalog::new(source)
            .fetch_routes(&config.route_types)
            .await?;
        let routes = StationResolver::new(source).resolve_all(entries).await?;

        let network = Self::build(routes, &config.down_lines);
        info!(
            routes = network.routes.len(),
            stations = network.stations.len(),
            transfer_stations = network.transfer_stations.len(),
            down_lines = network.transfers.down_lines().len(),
            "Built network"
        );
        Ok(network)
    }

    /// Routes keyed by id.
    pub fn routes(&self) -> &BTreeMap<RouteId, RouteEntry> {
        &self.routes
    }

    pub fn route(&self, id: &RouteId) -> Option<&RouteEntry> {
        self.routes.get(id)
    }

    pub fn stations(&self) -> &StationIndex {
        &self.stations
    }

    pub fn transfer_stations(&self) -> &TransferStations {
        &self.transfer_stations
    }

    pub fn transfers(&self) -> &TransferIndex {
        &self.transfers
    }

    pub fn down_lines(&self) -> &BTreeSet<RouteId> {
        self.transfers.down_lines()
    }

    /// The route serving the most stations; ties go to the lowest id.
    pub fn most_stops(&self) -> Option<&RouteEntry> {
        self.routes
            .values()
            .fold(None, |best: Option<&RouteEntry>, entry| match best {
                Some(b) if b.num_stops() >= entry.num_stops() => Some(b),
                _ => Some(entry),
            })
    }

    /// The route serving the fewest stations; ties go to the lowest id.
    pub fn fewest_stops(&self) -> Option<&RouteEntry> {
        self.routes.values().min_by_key(|entry| entry.num_stops())
    }

    /// Find a connection between two indexed stations.
    pub fn find_connection(
        &self,
        origin: &StationIndexEntry,
        destination: &StationIndexEntry,
    ) -> Result<Connection, TransferRouteError> {
        find_connection(origin, destination, &self.transfers)
    }

    /// Display name of a route, falling back to its id.
    pub fn route_name<'a>(&'a self, id: &'a RouteId) -> &'a str {
        self.routes
            .get(id)
            .map(|e| e.route.name.as_str())
            .unwrap_or(id.as_str())
    }

    /// Render a connection as riding directions, e.g.
    /// "From Alewife take the Red Line to Park Street. Then take the Green
    /// Line B to Kenmore."
    pub fn directions(&self, origin: &StationIndexEntry, connection: &Connection) -> String {
        let legs: Vec<String> = connection
            .lines
            .iter()
            .zip(&connection.transfer_stations)
            .map(|(line, station)| {
                let station_name = self
                    .stations
                    .get(station)
                    .map(|e| e.station.name.as_str())
                    .unwrap_or(station.as_str());
                format!("take the {} to {}.", self.route_name(line), station_name)
            })
            .collect();

        format!("From {} {}", origin.station.name, legs.join(" Then "))
    }
}
