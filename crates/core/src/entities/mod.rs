//! Typed record shapes for every bulk-importable entity.
//!
//! Each entity has its own `New*` struct with a validating `from_row`
//! constructor. [`EntityRecord`] is the tagged union the import pipeline
//! carries between transform and store.

pub mod common;
pub mod festival;
pub mod hotel;
pub mod place;
pub mod restaurant;
pub mod vehicle;

use serde::{Deserialize, Serialize};

pub use common::{ContactInfo, GeoPoint};
pub use festival::NewFestival;
pub use hotel::NewHotel;
pub use place::NewPlace;
pub use restaurant::NewRestaurant;
pub use vehicle::NewVehicle;

// ---------------------------------------------------------------------------
// Entity Kind
// ---------------------------------------------------------------------------

/// An entity type that supports bulk import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Places,
    Hotels,
    Restaurants,
    Festivals,
    Vehicles,
}

impl EntityKind {
    /// The entity key, which is also the destination table name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Places => "places",
            Self::Hotels => "hotels",
            Self::Restaurants => "restaurants",
            Self::Festivals => "festivals",
            Self::Vehicles => "vehicles",
        }
    }

    /// Parse an entity key. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "places" => Some(Self::Places),
            "hotels" => Some(Self::Hotels),
            "restaurants" => Some(Self::Restaurants),
            "festivals" => Some(Self::Festivals),
            "vehicles" => Some(Self::Vehicles),
            _ => None,
        }
    }

    /// All valid entity keys.
    pub const ALL: &'static [&'static str] =
        &["places", "hotels", "restaurants", "festivals", "vehicles"];
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity Record
// ---------------------------------------------------------------------------

/// A transformed row, ready to be written to its destination table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum EntityRecord {
    Place(NewPlace),
    Hotel(NewHotel),
    Restaurant(NewRestaurant),
    Festival(NewFestival),
    Vehicle(NewVehicle),
}

impl EntityRecord {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Place(_) => EntityKind::Places,
            Self::Hotel(_) => EntityKind::Hotels,
            Self::Restaurant(_) => EntityKind::Restaurants,
            Self::Festival(_) => EntityKind::Festivals,
            Self::Vehicle(_) => EntityKind::Vehicles,
        }
    }

    /// Destination table for this record.
    pub fn table(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Place(r) => &r.name,
            Self::Hotel(r) => &r.name,
            Self::Restaurant(r) => &r.name,
            Self::Festival(r) => &r.name,
            Self::Vehicle(r) => &r.name,
        }
    }
}
