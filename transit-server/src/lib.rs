//! MBTA transit connection finder server.
//!
//! Loads the subway routes of the Boston-area network, works out where
//! they meet, and answers: "which lines do I ride, and where do I change,
//! to get from this station to that one?"

pub mod cache;
pub mod catalog;
pub mod domain;
pub mod logging;
pub mod mbta;
pub mod network;
pub mod web;
