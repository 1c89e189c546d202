//! Festivals and cultural events.

use chrono::NaiveDate;
use serde::Serialize;
use validator::Validate;

use super::common::check;
use super::EntityRecord;
use crate::cells::{flag, list, optional_date, optional_text, required_date, required_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewFestival {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub significance: Option<String>,
    pub images: Vec<String>,
    pub is_public_holiday: bool,
}

impl NewFestival {
    pub fn from_row(row: &RawRow) -> Result<Self, TransformError> {
        let festival = Self {
            name: required_text(row, "name")?,
            description: optional_text(row, "description"),
            start_date: required_date(row, "start_date")?,
            end_date: optional_date(row, "end_date")?,
            location: optional_text(row, "location"),
            significance: optional_text(row, "significance"),
            images: list(row, "images"),
            is_public_holiday: flag(row, "is_public_holiday")?,
        };
        if festival.end_date.is_some_and(|end| end < festival.start_date) {
            return Err(TransformError::Invalid {
                column: "end_date".to_string(),
                message: "must not be before start_date".to_string(),
            });
        }
        check(&festival, "")?;
        Ok(festival)
    }
}

/// Import transform for the `festivals` config.
pub fn transform(row: &RawRow) -> Result<EntityRecord, TransformError> {
    NewFestival::from_row(row).map(EntityRecord::Festival)
}
