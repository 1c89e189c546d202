//! Declarative bulk-import configuration, one per importable entity.
//!
//! The registry is a fixed table: an entity key either maps to an
//! [`ImportConfig`] or bulk import is unsupported for it.

use serde::Serialize;

use crate::csv_rows::RawRow;
use crate::entities::{festival, hotel, place, restaurant, vehicle, EntityKind, EntityRecord};
use crate::error::{CoreError, TransformError};

/// Converts one raw row into a typed record. Must not mutate its input.
pub type TransformFn = fn(&RawRow) -> Result<EntityRecord, TransformError>;

/// How CSV rows for one entity are shaped and converted.
#[derive(Serialize)]
pub struct ImportConfig {
    pub kind: EntityKind,
    /// Display name shown in the import dialog.
    pub label: &'static str,
    /// Destination table.
    pub target_collection: &'static str,
    /// Expected column headers, in template order.
    pub field_names: &'static [&'static str],
    /// Example rows written below the header in the template.
    #[serde(skip)]
    pub sample_rows: &'static [&'static [(&'static str, &'static str)]],
    #[serde(skip)]
    pub transform: TransformFn,
}

impl std::fmt::Debug for ImportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImportConfig")
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("target_collection", &self.target_collection)
            .field("field_names", &self.field_names)
            .finish_non_exhaustive()
    }
}

impl ImportConfig {
    /// Entity key, e.g. `"hotels"`.
    pub fn key(&self) -> &'static str {
        self.kind.as_str()
    }

    pub fn transform(&self, row: &RawRow) -> Result<EntityRecord, TransformError> {
        (self.transform)(row)
    }

    /// Sample rows as [`RawRow`]s, keyed by column.
    pub fn sample_raw_rows(&self) -> Vec<RawRow> {
        self.sample_rows
            .iter()
            .map(|cells| cells.iter().copied().collect())
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

static CONFIGS: [ImportConfig; 5] = [
    ImportConfig {
        kind: EntityKind::Places,
        label: "Places",
        target_collection: "places",
        field_names: &[
            "name",
            "description",
            "category",
            "district",
            "province",
            "address",
            "latitude",
            "longitude",
            "entry_fee",
            "opening_hours",
            "best_time_to_visit",
            "images",
            "tags",
            "is_featured",
        ],
        sample_rows: &[
            &[
                ("name", "Phewa Lake"),
                ("description", "Freshwater lake with views of the Annapurna range"),
                ("category", "lake"),
                ("district", "Kaski"),
                ("province", "Gandaki"),
                ("address", "Lakeside, Pokhara"),
                ("latitude", "28.2154"),
                ("longitude", "83.9456"),
                ("entry_fee", "0"),
                ("opening_hours", "Open all day"),
                ("best_time_to_visit", "October-November"),
                ("images", "https://cdn.batohi.app/places/phewa-1.jpg;https://cdn.batohi.app/places/phewa-2.jpg"),
                ("tags", "lake;boating;sunset"),
                ("is_featured", "true"),
            ],
            &[
                ("name", "Boudhanath Stupa"),
                ("description", "One of the largest spherical stupas in the world"),
                ("category", "heritage"),
                ("district", "Kathmandu"),
                ("province", "Bagmati"),
                ("address", "Boudha, Kathmandu"),
                ("latitude", "27.7215"),
                ("longitude", "85.3620"),
                ("entry_fee", "400"),
                ("opening_hours", "05:00-21:00"),
                ("best_time_to_visit", "Evening"),
                ("images", ""),
                ("tags", "stupa;unesco"),
                ("is_featured", "false"),
            ],
        ],
        transform: place::transform,
    },
    ImportConfig {
        kind: EntityKind::Hotels,
        label: "Hotels",
        target_collection: "hotels",
        field_names: &[
            "name",
            "description",
            "address",
            "city",
            "star_rating",
            "price_per_night",
            "amenities",
            "images",
            "contact_phone",
            "contact_email",
            "contact_website",
            "is_available",
        ],
        sample_rows: &[&[
            ("name", "Yak Inn"),
            ("description", "Family-run lodge near the lakeside"),
            ("address", "Street 12, Lakeside"),
            ("city", "Pokhara"),
            ("star_rating", "3"),
            ("price_per_night", "4500"),
            ("amenities", "wifi;parking;breakfast"),
            ("images", "https://cdn.batohi.app/hotels/yak-inn.jpg"),
            ("contact_phone", "+977-61-460000"),
            ("contact_email", "desk@yakinn.com.np"),
            ("contact_website", "https://yakinn.com.np"),
            ("is_available", "true"),
        ]],
        transform: hotel::transform,
    },
    ImportConfig {
        kind: EntityKind::Restaurants,
        label: "Restaurants",
        target_collection: "restaurants",
        field_names: &[
            "name",
            "description",
            "address",
            "city",
            "cuisines",
            "price_range",
            "rating",
            "opening_hours",
            "contact_phone",
            "contact_email",
            "contact_website",
            "is_vegetarian_friendly",
            "images",
        ],
        sample_rows: &[&[
            ("name", "Thakali Bhancha Ghar"),
            ("description", "Traditional Thakali set meals"),
            ("address", "Jhamsikhel"),
            ("city", "Lalitpur"),
            ("cuisines", "thakali;nepali"),
            ("price_range", "$$"),
            ("rating", "4.6"),
            ("opening_hours", "10:00-22:00"),
            ("contact_phone", "+977-1-5550000"),
            ("contact_email", ""),
            ("contact_website", ""),
            ("is_vegetarian_friendly", "yes"),
            ("images", ""),
        ]],
        transform: restaurant::transform,
    },
    ImportConfig {
        kind: EntityKind::Festivals,
        label: "Festivals",
        target_collection: "festivals",
        field_names: &[
            "name",
            "description",
            "start_date",
            "end_date",
            "location",
            "significance",
            "images",
            "is_public_holiday",
        ],
        sample_rows: &[&[
            ("name", "Dashain"),
            ("description", "Fifteen-day festival celebrating the victory of good over evil"),
            ("start_date", "2025-09-22"),
            ("end_date", "2025-10-06"),
            ("location", "Nationwide"),
            ("significance", "Largest Hindu festival in Nepal"),
            ("images", ""),
            ("is_public_holiday", "true"),
        ]],
        transform: festival::transform,
    },
    ImportConfig {
        kind: EntityKind::Vehicles,
        label: "Vehicles",
        target_collection: "vehicles",
        field_names: &[
            "name",
            "vehicle_type",
            "capacity",
            "price_per_day",
            "driver_included",
            "features",
            "contact_phone",
            "contact_email",
            "contact_website",
            "is_available",
        ],
        sample_rows: &[&[
            ("name", "Mahindra Scorpio 4WD"),
            ("vehicle_type", "jeep"),
            ("capacity", "7"),
            ("price_per_day", "9000"),
            ("driver_included", "true"),
            ("features", "4wd;roof rack;ac"),
            ("contact_phone", "+977-9800000000"),
            ("contact_email", "rentals@batohi.app"),
            ("contact_website", ""),
            ("is_available", "true"),
        ]],
        transform: vehicle::transform,
    },
];

/// Look up the import config for an entity key.
///
/// `None` means bulk import is unsupported for that entity and the
/// affordance should be hidden.
pub fn config_for(key: &str) -> Option<&'static ImportConfig> {
    CONFIGS.iter().find(|c| c.key() == key)
}

/// Like [`config_for`], but an unknown key is an error.
pub fn require_config(key: &str) -> Result<&'static ImportConfig, CoreError> {
    config_for(key).ok_or_else(|| CoreError::UnknownEntity(key.to_string()))
}

pub fn all_configs() -> &'static [ImportConfig] {
    &CONFIGS
}
