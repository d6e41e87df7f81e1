//! MBTA v3 API response DTOs.
//!
//! The API speaks JSON:API: every record has an `id`, a `type`, an
//! `attributes` object and a `relationships` object whose members point at
//! other records by `{id, type}`. Compound documents carry those related
//! records in a top-level `included` array.
//!
//! Fields the conversion step has to validate are `Option` so that a
//! missing key surfaces as a domain error rather than a serde failure.

use std::collections::HashMap;

use serde::Deserialize;

/// Response from `GET /routes`.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteListResponse {
    pub data: Vec<RouteResource>,
}

/// A route record from the listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResource {
    pub id: String,
    pub attributes: RouteAttributes,
}

/// Attributes of a route record.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteAttributes {
    /// e.g. "Red Line". Empty for most bus routes.
    #[serde(default)]
    pub long_name: String,

    /// e.g. "B" for Green-B, "1" for bus route 1.
    #[serde(default)]
    pub short_name: String,

    /// e.g. `["South", "North"]`.
    #[serde(default)]
    pub direction_names: Vec<String>,

    /// e.g. `["Ashmont/Braintree", "Alewife"]`.
    #[serde(default)]
    pub direction_destinations: Vec<String>,

    /// GTFS route type code.
    #[serde(rename = "type")]
    pub route_type: u8,
}

/// Response from
/// `GET /routes/{id}?include=route_patterns.representative_trip.stops`.
///
/// Both members are optional: a throttled response carries an `errors`
/// array instead.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteStationsResponse {
    pub data: Option<RouteWithRelationships>,
    pub included: Option<Vec<IncludedResource>>,
}

/// The primary route record of a compound document.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteWithRelationships {
    pub id: String,
    pub relationships: Option<Relationships>,
}

/// Relationship name → linkage.
pub type Relationships = HashMap<String, Relationship>;

/// A related record in `included`.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedResource {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub id: Option<String>,
    pub attributes: Option<IncludedAttributes>,
    pub relationships: Option<Relationships>,
}

/// The only included attribute we read is the stop name.
#[derive(Debug, Clone, Deserialize)]
pub struct IncludedAttributes {
    pub name: Option<String>,
}

/// A relationship member. `data` is `null` for an empty to-one link.
#[derive(Debug, Clone, Deserialize)]
pub struct Relationship {
    #[serde(default)]
    pub data: Option<Linkage>,
}

/// To-one or to-many resource linkage.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Linkage {
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

/// `{id, type}` pointer to another record.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceIdentifier {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

impl Linkage {
    /// The single identifier of a to-one link.
    pub fn as_one(&self) -> Option<&ResourceIdentifier> {
        match self {
            Linkage::One(id) => Some(id),
            Linkage::Many(_) => None,
        }
    }

    /// The identifiers of a to-many link.
    pub fn as_many(&self) -> Option<&[ResourceIdentifier]> {
        match self {
            Linkage::One(_) => None,
            Linkage::Many(ids) => Some(ids),
        }
    }
}
