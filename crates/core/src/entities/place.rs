//! Tourist places (temples, lakes, viewpoints, trekking spots).

use serde::Serialize;
use validator::Validate;

use super::common::{check, GeoPoint};
use super::EntityRecord;
use crate::cells::{flag, list, optional_f64, optional_text, required_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewPlace {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub entry_fee: Option<f64>,
    pub opening_hours: Option<String>,
    pub best_time_to_visit: Option<String>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
    pub is_featured: bool,
}

impl NewPlace {
    pub fn from_row(row: &RawRow) -> Result<Self, TransformError> {
        let place = Self {
            name: required_text(row, "name")?,
            description: optional_text(row, "description"),
            category: optional_text(row, "category"),
            district: optional_text(row, "district"),
            province: optional_text(row, "province"),
            address: optional_text(row, "address"),
            location: GeoPoint::from_row(row)?,
            entry_fee: optional_f64(row, "entry_fee")?,
            opening_hours: optional_text(row, "opening_hours"),
            best_time_to_visit: optional_text(row, "best_time_to_visit"),
            images: list(row, "images"),
            tags: list(row, "tags"),
            is_featured: flag(row, "is_featured")?,
        };
        check(&place, "")?;
        Ok(place)
    }
}

/// Import transform for the `places` config.
pub fn transform(row: &RawRow) -> Result<EntityRecord, TransformError> {
    NewPlace::from_row(row).map(EntityRecord::Place)
}
