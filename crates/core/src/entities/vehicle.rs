//! Rental vehicles (jeeps, buses, bikes).

use serde::Serialize;
use validator::Validate;

use super::common::{check, ContactInfo};
use super::EntityRecord;
use crate::cells::{flag, flag_or, list, optional_f64, optional_i32, required_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewVehicle {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 64, message = "must be 1-64 characters"))]
    pub vehicle_type: String,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub capacity: Option<i32>,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub price_per_day: Option<f64>,
    pub driver_included: bool,
    pub features: Vec<String>,
    pub contact: Option<ContactInfo>,
    pub is_available: bool,
}

impl NewVehicle {
    pub fn from_row(row: &RawRow) -> Result<Self, TransformError> {
        let vehicle = Self {
            name: required_text(row, "name")?,
            vehicle_type: required_text(row, "vehicle_type")?,
            capacity: optional_i32(row, "capacity")?,
            price_per_day: optional_f64(row, "price_per_day")?,
            driver_included: flag(row, "driver_included")?,
            features: list(row, "features"),
            contact: ContactInfo::from_row(row)?,
            is_available: flag_or(row, "is_available", true)?,
        };
        check(&vehicle, "")?;
        Ok(vehicle)
    }
}

/// Import transform for the `vehicles` config.
pub fn transform(row: &RawRow) -> Result<EntityRecord, TransformError> {
    NewVehicle::from_row(row).map(EntityRecord::Vehicle)
}
