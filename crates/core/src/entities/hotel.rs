//! Hotels and lodges.

use serde::Serialize;
use validator::Validate;

use super::common::{check, ContactInfo};
use super::EntityRecord;
use crate::cells::{flag_or, list, optional_f64, optional_i32, optional_text, required_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewHotel {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[validate(range(min = 1, max = 5, message = "must be between 1 and 5"))]
    pub star_rating: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price_per_night: Option<f64>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub contact: Option<ContactInfo>,
    pub is_available: bool,
}

impl NewHotel {
    pub fn from_row(row: &RawRow) -> Result<Self, TransformError> {
        let hotel = Self {
            name: required_text(row, "name")?,
            description: optional_text(row, "description"),
            address: optional_text(row, "address"),
            city: optional_text(row, "city"),
            star_rating: optional_i32(row, "star_rating")?,
            price_per_night: optional_f64(row, "price_per_night")?,
            amenities: list(row, "amenities"),
            images: list(row, "images"),
            contact: ContactInfo::from_row(row)?,
            is_available: flag_or(row, "is_available", true)?,
        };
        check(&hotel, "")?;
        Ok(hotel)
    }
}

/// Import transform for the `hotels` config.
pub fn transform(row: &RawRow) -> Result<EntityRecord, TransformError> {
    NewHotel::from_row(row).map(EntityRecord::Hotel)
}
