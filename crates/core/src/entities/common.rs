//! Sub-objects shared by several entities, assembled from flat columns,
//! and the bridge from `validator` failures to [`TransformError`].

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::cells::{optional_f64, optional_text};
use crate::csv_rows::RawRow;
use crate::error::TransformError;

/// Geographic coordinates built from `latitude` and `longitude` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GeoPoint {
    #[validate(range(min = -90.0, max = 90.0, message = "must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0, message = "must be between -180 and 180"))]
    pub longitude: f64,
}

impl GeoPoint {
    /// Both columns blank gives `None`; exactly one filled is an error.
    pub fn from_row(row: &RawRow) -> Result<Option<Self>, TransformError> {
        let latitude = optional_f64(row, "latitude")?;
        let longitude = optional_f64(row, "longitude")?;
        let point = match (latitude, longitude) {
            (None, None) => return Ok(None),
            (Some(latitude), Some(longitude)) => Self {
                latitude,
                longitude,
            },
            (Some(_), None) => {
                return Err(TransformError::MissingField {
                    column: "longitude".to_string(),
                })
            }
            (None, Some(_)) => {
                return Err(TransformError::MissingField {
                    column: "latitude".to_string(),
                })
            }
        };
        check(&point, "")?;
        Ok(Some(point))
    }
}

/// Contact details built from `contact_phone`, `contact_email` and
/// `contact_website` columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    #[validate(length(max = 32, message = "must be at most 32 characters"))]
    pub phone: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub website: Option<String>,
}

impl ContactInfo {
    /// All contact columns blank gives `None`.
    pub fn from_row(row: &RawRow) -> Result<Option<Self>, TransformError> {
        let contact = Self {
            phone: optional_text(row, "contact_phone"),
            email: optional_text(row, "contact_email"),
            website: optional_text(row, "contact_website"),
        };
        if contact.phone.is_none() && contact.email.is_none() && contact.website.is_none() {
            return Ok(None);
        }
        check(&contact, "contact_")?;
        Ok(Some(contact))
    }
}

/// Run `validator` rules and report the first failing field as a
/// [`TransformError::Invalid`]. Field names map to CSV columns by
/// prepending `column_prefix`.
///
/// Fields are visited in name order so the reported error is stable.
pub fn check<T: Validate>(value: &T, column_prefix: &str) -> Result<(), TransformError> {
    value
        .validate()
        .map_err(|errors| first_violation(&errors, column_prefix))
}

fn first_violation(errors: &ValidationErrors, column_prefix: &str) -> TransformError {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .map(|e| e.to_string())
                .unwrap_or_else(|| "is invalid".to_string());
            (field.to_string(), message)
        })
        .collect();
    fields.sort();

    match fields.into_iter().next() {
        Some((field, message)) => TransformError::Invalid {
            column: format!("{column_prefix}{field}"),
            message,
        },
        None => TransformError::Invalid {
            column: column_prefix.trim_end_matches('_').to_string(),
            message: errors.to_string(),
        },
    }
}
