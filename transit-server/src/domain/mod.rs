//! Domain types for the transit network.
//!
//! Routes and stations as the rest of the crate sees them, independent of
//! the upstream API's JSON shapes.

mod route;
mod station;

pub use route::{Direction, Route, RouteEntry, RouteId, RouteType};
pub use station::{Station, StationId};
