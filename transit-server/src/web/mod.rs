//! Web layer for the transit connection finder.
//!
//! Provides JSON endpoints for browsing routes and stations and for finding
//! connections between stations.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
