//! Conversion from MBTA DTOs to domain types.
//!
//! Station resolution walks the compound document
//! route → route patterns → representative trip → stops → parent station.
//! Only each pattern's representative trip is sampled; that is enough to
//! see every branch without enumerating every trip of the day.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{Direction, Route, RouteId, RouteType, Station, StationId};

use super::error::MbtaError;
use super::types::{IncludedResource, Linkage, RouteResource, RouteStationsResponse};

/// Convert a route record into a [`Route`].
///
/// The display name is the long name, or the short name when the long
/// name is empty (bus routes). Directions pair each direction name with the
/// destination at the same position.
pub fn convert_route(resource: &RouteResource) -> Route {
    let attrs = &resource.attributes;
    let name = if attrs.long_name.is_empty() {
        attrs.short_name.clone()
    } else {
        attrs.long_name.clone()
    };

    let directions = attrs
        .direction_names
        .iter()
        .zip(&attrs.direction_destinations)
        .map(|(name, destination)| Direction {
            name: name.clone(),
            destination: destination.clone(),
        })
        .collect();

    Route {
        id: RouteId::new(resource.id.clone()),
        name,
        directions,
        route_type: RouteType(attrs.route_type),
    }
}

/// Included records of one response, split by type and keyed by id.
#[derive(Default)]
struct IncludedById<'a> {
    stops: HashMap<&'a str, &'a IncludedResource>,
    route_patterns: HashMap<&'a str, &'a IncludedResource>,
    trips: HashMap<&'a str, &'a IncludedResource>,
}

impl<'a> IncludedById<'a> {
    fn index(included: &'a [IncludedResource]) -> Result<Self, MbtaError> {
        let mut by_id = Self::default();

        for item in included {
            let kind = item
                .kind
                .as_deref()
                .ok_or_else(|| MbtaError::missing("included item type"))?;
            let id = item
                .id
                .as_deref()
                .ok_or_else(|| MbtaError::missing("included item id"))?;

            match kind {
                "stop" => by_id.stops.insert(id, item),
                "route_pattern" => by_id.route_patterns.insert(id, item),
                "trip" => by_id.trips.insert(id, item),
                other => return Err(MbtaError::UnexpectedItemType(other.to_string())),
            };
        }

        Ok(by_id)
    }
}

/// Look up a named relationship on a record.
///
/// Returns `Ok(None)` when the relationship exists with `data: null`.
fn relationship<'a>(
    item: &'a IncludedResource,
    name: &str,
    owner: &str,
) -> Result<Option<&'a Linkage>, MbtaError> {
    item.relationships
        .as_ref()
        .and_then(|rels| rels.get(name))
        .map(|rel| rel.data.as_ref())
        .ok_or_else(|| MbtaError::missing(format!("{name} of {owner}")))
}

fn lookup<'a>(
    items: &HashMap<&str, &'a IncludedResource>,
    kind: &str,
    id: &str,
) -> Result<&'a IncludedResource, MbtaError> {
    items
        .get(id)
        .copied()
        .ok_or_else(|| MbtaError::missing(format!("included {kind} {id}")))
}

/// Convert a stop record into the station that contains it.
///
/// A stop with an explicit `null` parent is itself a station and keeps its
/// own id.
pub fn convert_stop(stop: &IncludedResource) -> Result<Station, MbtaError> {
    let stop_id = stop
        .id
        .as_deref()
        .ok_or_else(|| MbtaError::missing("stop id"))?;
    let owner = format!("stop {stop_id}");

    let name = stop
        .attributes
        .as_ref()
        .and_then(|a| a.name.clone())
        .ok_or_else(|| MbtaError::missing(format!("name of {owner}")))?;

    let station_id = match relationship(stop, "parent_station", &owner)? {
        Some(Linkage::One(parent)) => parent.id.clone(),
        Some(Linkage::Many(_)) => {
            return Err(MbtaError::missing(format!("to-one parent_station of {owner}")));
        }
        None => stop_id.to_string(),
    };

    Ok(Station::new(StationId::new(station_id), name))
}

/// Collect every station served by the route in a compound document.
pub fn convert_route_stations(
    response: &RouteStationsResponse,
) -> Result<BTreeSet<Station>, MbtaError> {
    let included = response
        .included
        .as_deref()
        .ok_or_else(|| MbtaError::missing("included"))?;
    let by_id = IncludedById::index(included)?;

    let route = response
        .data
        .as_ref()
        .ok_or_else(|| MbtaError::missing("data"))?;
    let patterns = route
        .relationships
        .as_ref()
        .and_then(|rels| rels.get("route_patterns"))
        .and_then(|rel| rel.data.as_ref())
        .and_then(Linkage::as_many)
        .ok_or_else(|| MbtaError::missing(format!("route_patterns of route {}", route.id)))?;

    let mut stations = BTreeSet::new();

    for pattern_ref in patterns {
        let pattern = lookup(&by_id.route_patterns, "route_pattern", &pattern_ref.id)?;
        let pattern_owner = format!("route_pattern {}", pattern_ref.id);

        let trip_ref = relationship(pattern, "representative_trip", &pattern_owner)?
            .and_then(Linkage::as_one)
            .ok_or_else(|| MbtaError::missing(format!("representative_trip of {pattern_owner}")))?;
        let trip = lookup(&by_id.trips, "trip", &trip_ref.id)?;
        let trip_owner = format!("trip {}", trip_ref.id);

        let stop_refs = relationship(trip, "stops", &trip_owner)?
            .and_then(Linkage::as_many)
            .ok_or_else(|| MbtaError::missing(format!("stops of {trip_owner}")))?;

        for stop_ref in stop_refs {
            let stop = lookup(&by_id.stops, "stop", &stop_ref.id)?;
            stations.insert(convert_stop(stop)?);
        }
    }

    Ok(stations)
}
