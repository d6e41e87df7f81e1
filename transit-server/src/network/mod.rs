//! The route-transfer network.
//!
//! Routes and stations form a bipartite graph. This module derives the
//! station-centric index (station → routes serving it), the transfer
//! stations (served by two or more routes), and the route-centric transfer
//! index (route → routes reachable by one change, and where), then searches
//! that index for short connections between stations.

mod config;
mod index;
mod path;
mod snapshot;
mod transfers;

pub use config::{InvalidRouteType, NetworkConfig, parse_route_ids, parse_route_types};
pub use index::{StationIndex, StationIndexEntry, TransferStations};
pub use path::{Connection, MAX_LINES, TransferRouteError, find_connection};
pub use snapshot::Network;
pub use transfers::{Transfer, TransferIndex};

#[cfg(test)]
pub(crate) mod test_support;
