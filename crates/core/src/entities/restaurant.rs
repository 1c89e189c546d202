//! Restaurants and eateries.

use serde::Serialize;
use validator::Validate;

use super::common::{check, ContactInfo};
use super::EntityRecord;
use crate::cells::{flag, list, optional_f64, optional_text, required_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct NewRestaurant {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub cuisines: Vec<String>,
    #[validate(length(max = 16, message = "must be at most 16 characters"))]
    pub price_range: Option<String>,
    #[validate(range(min = 0.0, max = 5.0, message = "must be between 0 and 5"))]
    pub rating: Option<f64>,
    pub opening_hours: Option<String>,
    pub contact: Option<ContactInfo>,
    pub is_vegetarian_friendly: bool,
    pub images: Vec<String>,
}

impl NewRestaurant {
    pub fn from_row(row: &RawRow) -> Result<Self, TransformError> {
        let restaurant = Self {
            name: required_text(row, "name")?,
            description: optional_text(row, "description"),
            address: optional_text(row, "address"),
            city: optional_text(row, "city"),
            cuisines: list(row, "cuisines"),
            price_range: optional_text(row, "price_range"),
            rating: optional_f64(row, "rating")?,
            opening_hours: optional_text(row, "opening_hours"),
            contact: ContactInfo::from_row(row)?,
            is_vegetarian_friendly: flag(row, "is_vegetarian_friendly")?,
            images: list(row, "images"),
        };
        check(&restaurant, "")?;
        Ok(restaurant)
    }
}

/// Import transform for the `restaurants` config.
pub fn transform(row: &RawRow) -> Result<EntityRecord, TransformError> {
    NewRestaurant::from_row(row).map(EntityRecord::Restaurant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn cuisines_split_into_list() {
        let r = NewRestaurant::from_row(&row(&[
            ("name", "Thakali Bhancha"),
            ("cuisines", "thakali; nepali"),
            ("rating", "4.5"),
            ("is_vegetarian_friendly", "TRUE"),
        ]))
        .unwrap();
        assert_eq!(r.cuisines, vec!["thakali", "nepali"]);
        assert_eq!(r.rating, Some(4.5));
        assert!(r.is_vegetarian_friendly);
        assert_eq!(r.contact, None);
    }

    #[test]
    fn rating_above_five_is_rejected() {
        let err = NewRestaurant::from_row(&row(&[("name", "X"), ("rating", "5.5")])).unwrap_err();
        assert_matches!(err, TransformError::Invalid { ref column, .. } if column == "rating");
    }
}
