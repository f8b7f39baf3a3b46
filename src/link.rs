//! Species/location join records
//!
//! The many-to-many relation is an explicit join entity with its own id.
//! The storage layer does not enforce uniqueness of the pair; seeding checks
//! for an identical pair before inserting.

use serde::{Deserialize, Serialize};

/// A persisted join row: "this species was observed at this location".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesLocationLink {
    pub id: i64,
    pub species_id: i64,
    pub location_id: i64,
}

/// A join row waiting to be inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSpeciesLocationLink {
    pub species_id: i64,
    pub location_id: i64,
}

/// A link candidate expressed by natural keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkCandidate {
    pub scientific_name: String,
    pub location_name: String,
}

impl LinkCandidate {
    pub fn new(scientific_name: impl Into<String>, location_name: impl Into<String>) -> Self {
        Self {
            scientific_name: scientific_name.into(),
            location_name: location_name.into(),
        }
    }
}

/// A join row resolved to the natural keys on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedNames {
    pub link_id: i64,
    pub scientific_name: String,
    pub location_name: String,
}
