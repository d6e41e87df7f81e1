//! Bounded transfer search between two stations.
//!
//! A breadth-first search over routes: level one holds the origin's
//! routes, each further level extends every path by one transfer edge.
//! The first path whose last route serves the destination wins, so the
//! result always uses the fewest routes the bound allows.
//!
//! Ties within a level are broken by iteration order, which is fixed:
//! origin routes in route id order, then each route's transfers in
//! [`TransferIndex`] order (transfer station id, then target route id).
//! Paths are extended in the order they were discovered.

use std::collections::{BTreeSet, VecDeque};

use serde::Serialize;

use crate::domain::{RouteId, StationId};

use super::index::StationIndexEntry;
use super::transfers::TransferIndex;

/// Maximum number of routes in a connection (three transfers).
pub const MAX_LINES: usize = 4;

/// No connection of at most [`MAX_LINES`] routes exists.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no connection from {origin} to {destination} within {} transfers", MAX_LINES - 1)]
pub struct TransferRouteError {
    pub origin: StationId,
    pub destination: StationId,
}

/// Routes to ride and where to leave each one.
///
/// `transfer_stations[i]` is where the rider leaves `lines[i]`; the last
/// element is always the destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Connection {
    pub lines: Vec<RouteId>,
    pub transfer_stations: Vec<StationId>,
}

impl Connection {
    pub fn transfer_count(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    pub fn is_direct(&self) -> bool {
        self.lines.len() == 1
    }
}

/// A partial path: the routes ridden so far and the stations changed at.
#[derive(Debug, Clone)]
struct PathState {
    lines: Vec<RouteId>,
    changes: Vec<StationId>,
}

impl PathState {
    fn last_line(&self) -> &RouteId {
        // Never empty: every state starts from an origin route
        &self.lines[self.lines.len() - 1]
    }

    fn finish(mut self, destination: &StationId) -> Connection {
        self.changes.push(destination.clone());
        Connection {
            lines: self.lines,
            transfer_stations: self.changes,
        }
    }
}

/// Find a sequence of routes from `origin` to `destination`.
///
/// Both entries must come from the same [`StationIndex`] the transfer
/// index was built from. A down line still serves a direct trip, but it has
/// no transfer edges, so it is never entered or left at a change.
///
/// [`StationIndex`]: super::StationIndex
pub fn find_connection(
    origin: &StationIndexEntry,
    destination: &StationIndexEntry,
    transfers: &TransferIndex,
) -> Result<Connection, TransferRouteError> {
    let serves_destination = |line: &RouteId| destination.lines.contains(line);

    let mut visited: BTreeSet<&RouteId> = BTreeSet::new();
    let mut frontier: VecDeque<PathState> = VecDeque::new();

    for line in &origin.lines {
        visited.insert(line);
        frontier.push_back(PathState {
            lines: vec![line.clone()],
            changes: Vec::new(),
        });
    }

    for depth in 1..=MAX_LINES {
        let hit = frontier
            .iter()
            .position(|p| serves_destination(p.last_line()));
        if let Some(found) = hit.and_then(|i| frontier.remove(i)) {
            return Ok(found.finish(destination.id()));
        }

        if depth == MAX_LINES {
            break;
        }

        let mut next = VecDeque::new();
        for path in frontier.drain(..) {
            for transfer in transfers.transfers_from(path.last_line()) {
                if !visited.insert(&transfer.line) {
                    continue;
                }
                let mut extended = path.clone();
                extended.lines.push(transfer.line.clone());
                extended.changes.push(transfer.station.clone());
                next.push_back(extended);
            }
        }
        frontier = next;
    }

    Err(TransferRouteError {
        origin: origin.id().clone(),
        destination: destination.id().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteEntry;
    use crate::network::index::{StationIndex, TransferStations};
    use crate::network::test_support::entry;

    struct Graph {
        stations: StationIndex,
        transfers: TransferIndex,
    }

    impl Graph {
        fn new(routes: &[RouteEntry], down: &[&str]) -> Self {
            let stations = StationIndex::build(routes);
            let down: BTreeSet<RouteId> = down.iter().map(|d| RouteId::new(*d)).collect();
            let transfers = TransferIndex::build(&TransferStations::filter(&stations), &down);
            Self {
                stations,
                transfers,
            }
        }

        fn connect(&self, from: &str, to: &str) -> Result<Connection, TransferRouteError> {
            find_connection(
                self.stations.get(&from.into()).unwrap(),
                self.stations.get(&to.into()).unwrap(),
                &self.transfers,
            )
        }
    }

    fn ids<T: From<&'static str>>(items: &[&'static str]) -> Vec<T> {
        items.iter().map(|s| T::from(*s)).collect()
    }

    fn red_blue() -> Vec<RouteEntry> {
        vec![entry("Red", &["A", "B", "C"]), entry("Blue", &["C", "D"])]
    }

    #[test]
    fn one_transfer_at_shared_station() {
        let graph = Graph::new(&red_blue(), &[]);
        let connection = graph.connect("A", "D").unwrap();

        assert_eq!(connection.lines, ids::<RouteId>(&["Red", "Blue"]));
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["C", "D"]));
        assert_eq!(connection.transfer_count(), 1);
    }

    #[test]
    fn down_line_breaks_the_only_connection() {
        let graph = Graph::new(&red_blue(), &["Blue"]);
        let err = graph.connect("A", "D").unwrap_err();

        assert_eq!(err.origin.as_str(), "A");
        assert_eq!(err.destination.as_str(), "D");
    }

    #[test]
    fn direct_route_closes_at_destination() {
        let graph = Graph::new(&red_blue(), &[]);
        let connection = graph.connect("A", "B").unwrap();

        assert!(connection.is_direct());
        assert_eq!(connection.lines, ids::<RouteId>(&["Red"]));
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["B"]));
    }

    #[test]
    fn origin_equal_to_destination_is_direct() {
        let graph = Graph::new(&red_blue(), &[]);
        let connection = graph.connect("C", "C").unwrap();
        assert_eq!(connection.lines, ids::<RouteId>(&["Blue"]));
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["C"]));
    }

    #[test]
    fn disconnected_routes_fail() {
        let graph = Graph::new(&[entry("Red", &["A", "B"]), entry("Blue", &["C", "D"])], &[]);
        assert!(graph.connect("A", "D").is_err());
    }

    /// R1 - R2 - R3 - R4 - R5 chained by single shared stations.
    fn chain() -> Vec<RouteEntry> {
        vec![
            entry("R1", &["s0", "x12"]),
            entry("R2", &["x12", "x23"]),
            entry("R3", &["x23", "x34"]),
            entry("R4", &["x34", "x45"]),
            entry("R5", &["x45", "s5"]),
        ]
    }

    #[test]
    fn two_transfers() {
        let graph = Graph::new(&chain(), &[]);
        let connection = graph.connect("s0", "x34").unwrap();

        assert_eq!(connection.lines, ids::<RouteId>(&["R1", "R2", "R3"]));
        assert_eq!(
            connection.transfer_stations,
            ids::<StationId>(&["x12", "x23", "x34"])
        );
    }

    #[test]
    fn three_transfers_is_the_limit() {
        let graph = Graph::new(&chain(), &[]);
        let connection = graph.connect("s0", "x45").unwrap();

        assert_eq!(connection.lines, ids::<RouteId>(&["R1", "R2", "R3", "R4"]));
        assert_eq!(
            connection.transfer_stations,
            ids::<StationId>(&["x12", "x23", "x34", "x45"])
        );
    }

    #[test]
    fn four_transfers_exceed_the_bound() {
        let graph = Graph::new(&chain(), &[]);
        // Reachable via R1..R5, but that is five routes
        assert!(graph.connect("s0", "s5").is_err());
    }

    #[test]
    fn middle_down_line_cuts_chain() {
        let graph = Graph::new(&chain(), &["R3"]);
        assert!(graph.connect("s0", "x23").is_ok());
        assert!(graph.connect("s0", "x45").is_err());
    }

    #[test]
    fn shallowest_path_wins_over_earlier_deeper_one() {
        // A→Z: one transfer via Blue at M, or two via Green then Orange.
        let graph = Graph::new(
            &[
                entry("Red", &["A", "G", "M"]),
                entry("Green", &["G", "H"]),
                entry("Orange", &["H", "Z"]),
                entry("Blue", &["M", "Z"]),
            ],
            &[],
        );
        let connection = graph.connect("A", "Z").unwrap();
        assert_eq!(connection.lines, ids::<RouteId>(&["Red", "Blue"]));
    }

    #[test]
    fn ties_go_to_lowest_route_id_then_station_id() {
        // A is on Red and Orange; D is on Blue and Green. Every pairing
        // connects with one transfer.
        let graph = Graph::new(
            &[
                entry("Red", &["A", "P", "Q"]),
                entry("Orange", &["A", "R"]),
                entry("Blue", &["Q", "R", "D"]),
                entry("Green", &["P", "D"]),
            ],
            &[],
        );
        let connection = graph.connect("A", "D").unwrap();

        // Orange sorts before Red; Orange only reaches Blue (at R).
        assert_eq!(connection.lines, ids::<RouteId>(&["Orange", "Blue"]));
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["R", "D"]));
    }

    #[test]
    fn ties_within_a_route_go_to_lowest_station() {
        // Red meets Blue at both P and Q.
        let graph = Graph::new(
            &[entry("Red", &["A", "Q", "P"]), entry("Blue", &["P", "Q", "D"])],
            &[],
        );
        let connection = graph.connect("A", "D").unwrap();
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["P", "D"]));
    }

    #[test]
    fn direct_trip_on_down_line_is_still_offered() {
        let graph = Graph::new(&red_blue(), &["Red"]);
        let connection = graph.connect("A", "B").unwrap();

        assert_eq!(connection.lines, ids::<RouteId>(&["Red"]));
        assert_eq!(connection.transfer_stations, ids::<StationId>(&["B"]));
    }

    #[test]
    fn down_line_cannot_be_left_at_a_change() {
        let graph = Graph::new(&red_blue(), &["Red"]);
        assert!(graph.connect("A", "D").is_err());
        // Blue is up, but its only change is onto Red
        assert!(graph.connect("D", "A").is_err());
    }

    #[test]
    fn routes_are_not_revisited() {
        // Red and Blue meet twice; the path must not bounce back onto Red.
        let graph = Graph::new(
            &[
                entry("Red", &["A", "X", "Y"]),
                entry("Blue", &["X", "Y"]),
                entry("Green", &["Y", "Z"]),
            ],
            &[],
        );
        let connection = graph.connect("A", "Z").unwrap();
        assert_eq!(connection.lines, ids::<RouteId>(&["Red", "Green"]));
        let unique: BTreeSet<_> = connection.lines.iter().collect();
        assert_eq!(unique.len(), connection.lines.len());
    }
}
