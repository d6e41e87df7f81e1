//! Station-centric view of the network.

use std::collections::{BTreeMap, BTreeSet};

use crate::domain::{RouteEntry, RouteId, Station, StationId};

/// A station and every route that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationIndexEntry {
    pub station: Station,
    /// Never empty.
    pub lines: BTreeSet<RouteId>,
}

impl StationIndexEntry {
    /// Whether more than one route serves this station.
    pub fn is_transfer(&self) -> bool {
        self.lines.len() > 1
    }

    pub fn id(&self) -> &StationId {
        &self.station.id
    }
}

/// Station id → station and the routes serving it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StationIndex {
    entries: BTreeMap<StationId, StationIndexEntry>,
}

impl StationIndex {
    /// Aggregate routes into a station index.
    ///
    /// A station's route set is the union of every route whose station set
    /// contains it. When routes disagree on a station's name, the
    /// lexicographically smallest name is kept. Neither depends on the order
    /// routes are visited in.
    pub fn build<'a>(routes: impl IntoIterator<Item = &'a RouteEntry>) -> Self {
        let mut entries: BTreeMap<StationId, StationIndexEntry> = BTreeMap::new();

        for route in routes {
            for station in &route.stations {
                let indexed = entries
                    .entry(station.id.clone())
                    .or_insert_with(|| StationIndexEntry {
                        station: station.clone(),
                        lines: BTreeSet::new(),
                    });
                if station.name < indexed.station.name {
                    indexed.station.name = station.name.clone();
                }
                indexed.lines.insert(route.id().clone());
            }
        }

        Self { entries }
    }

    pub fn get(&self, id: &StationId) -> Option<&StationIndexEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &StationId) -> bool {
        self.entries.contains_key(id)
    }

    /// Entries in station id order.
    pub fn iter(&self) -> impl Iterator<Item = &StationIndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Stations served by two or more routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferStations {
    entries: BTreeMap<StationId, StationIndexEntry>,
}

impl TransferStations {
    /// Keep the entries of `index` that are transfer stations.
    pub fn filter(index: &StationIndex) -> Self {
        let entries = index
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_transfer())
            .map(|(id, entry)| (id.clone(), entry.clone()))
            .collect();
        Self { entries }
    }

    pub fn get(&self, id: &StationId) -> Option<&StationIndexEntry> {
        self.entries.get(id)
    }

    /// Entries in station id order.
    pub fn iter(&self) -> impl Iterator<Item = &StationIndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<TransferStations> for StationIndex {
    fn from(transfers: TransferStations) -> Self {
        Self {
            entries: transfers.entries,
        }
    }
}
