//! Route-centric transfer adjacency.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{RouteId, StationId};

use super::index::TransferStations;

/// "From this route you can change onto `line` at `station`."
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Transfer {
    pub line: RouteId,
    pub station: StationId,
}

/// Route id → transfers available from that route.
///
/// Down lines are seeded with empty lists and never appear as a transfer
/// target, so they contribute no edges in either direction. Routes that
/// serve no transfer station are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferIndex {
    edges: BTreeMap<RouteId, Vec<Transfer>>,
    down_lines: BTreeSet<RouteId>,
}

impl TransferIndex {
    /// Derive transfer edges from the transfer stations.
    ///
    /// For each station (in station id order) and each non-down route
    /// serving it (in route id order), one edge is appended to every other
    /// non-down route serving it. Each route's list therefore ends up
    /// ordered by transfer station, then by target line.
    pub fn build(transfer_stations: &TransferStations, down_lines: &BTreeSet<RouteId>) -> Self {
        let mut edges: BTreeMap<RouteId, Vec<Transfer>> = down_lines
            .iter()
            .map(|line| (line.clone(), Vec::new()))
            .collect();

        for station in transfer_stations.iter() {
            let up: Vec<&RouteId> = station
                .lines
                .iter()
                .filter(|line| !down_lines.contains(*line))
                .collect();

            for &line in &up {
                let targets = up
                    .iter()
                    .filter(|target| **target != line)
                    .map(|target| Transfer {
                        line: (*target).clone(),
                        station: station.id().clone(),
                    });
                edges.entry(line.clone()).or_default().extend(targets);
            }
        }

        Self {
            edges,
            down_lines: down_lines.clone(),
        }
    }

    /// Transfers available from `line`; empty when none are known.
    pub fn transfers_from(&self, line: &RouteId) -> &[Transfer] {
        self.edges.get(line).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Whether `line` has an entry, possibly empty.
    pub fn contains(&self, line: &RouteId) -> bool {
        self.edges.contains_key(line)
    }

    pub fn is_down(&self, line: &RouteId) -> bool {
        self.down_lines.contains(line)
    }

    pub fn down_lines(&self) -> &BTreeSet<RouteId> {
        &self.down_lines
    }

    /// Routes with an entry, in route id order.
    pub fn lines(&self) -> impl Iterator<Item = &RouteId> {
        self.edges.keys()
    }
}
