//! Fixtures shared by the network tests.

use proptest::prelude::*;

use crate::domain::{Route, RouteEntry, RouteId, RouteType, Station};

/// A route entry serving the given station ids, each named after its id.
pub(crate) fn entry(id: &str, stations: &[&str]) -> RouteEntry {
    let route = Route {
        id: RouteId::new(id),
        name: format!("{id} Line"),
        directions: vec![],
        route_type: RouteType::HEAVY_RAIL,
    };
    let stations = stations.iter().map(|s| Station::new(*s, *s)).collect();
    RouteEntry::with_stations(route, stations)
}

/// Up to six routes with distinct ids, each over a small shared pool of
/// stations so that transfers are common.
pub(crate) fn arb_routes() -> impl Strategy<Value = Vec<(String, Vec<String>)>> {
    proptest::collection::btree_map(
        "[A-H]",
        proptest::collection::vec("s[0-7]", 0..5),
        0..6,
    )
    .prop_map(|routes| routes.into_iter().collect())
}
