//! Route catalog and station resolution.
//!
//! The two refresh-time components: the catalog lists routes for a set of
//! route types, and the resolver fills in the stations each route serves.
//! Both talk to the upstream through [`TransitSource`].

mod routes;
mod source;
mod stations;

pub use routes::RouteCatalog;
pub use source::TransitSource;
pub use stations::StationResolver;

#[cfg(test)]
pub(crate) mod test_support;
