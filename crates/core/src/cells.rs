//! Conversions from raw CSV cells to typed values.
//!
//! Every helper reads from a borrowed [`RawRow`] and reports failures as a
//! [`TransformError`] naming the column and the offending text. Cells are
//! trimmed before interpretation; a missing column is treated like a blank
//! cell.

use chrono::NaiveDate;

use crate::csv_rows::RawRow;
use crate::error::TransformError;

/// Primary delimiter for list-valued cells (`"wifi; parking; spa"`).
pub const LIST_DELIMITER: char = ';';

/// Also accepted as a list delimiter, for spreadsheets that reserve `;`.
pub const ALT_LIST_DELIMITER: char = '|';

/// Date format expected in date columns.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn cell<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column).map(str::trim).filter(|v| !v.is_empty())
}

pub fn optional_text(row: &RawRow, column: &str) -> Option<String> {
    cell(row, column).map(str::to_string)
}

pub fn required_text(row: &RawRow, column: &str) -> Result<String, TransformError> {
    optional_text(row, column).ok_or_else(|| TransformError::MissingField {
        column: column.to_string(),
    })
}

pub fn optional_f64(row: &RawRow, column: &str) -> Result<Option<f64>, TransformError> {
    let Some(raw) = cell(row, column) else {
        return Ok(None);
    };
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(TransformError::InvalidNumber {
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

pub fn required_f64(row: &RawRow, column: &str) -> Result<f64, TransformError> {
    optional_f64(row, column)?.ok_or_else(|| TransformError::MissingField {
        column: column.to_string(),
    })
}

pub fn optional_i32(row: &RawRow, column: &str) -> Result<Option<i32>, TransformError> {
    let Some(raw) = cell(row, column) else {
        return Ok(None);
    };
    raw.parse::<i32>()
        .map(Some)
        .map_err(|_| TransformError::InvalidInteger {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

/// Boolean cell. Blank means `false`.
///
/// Accepts `true/false`, `yes/no`, `y/n`, `1/0` in any case.
pub fn flag(row: &RawRow, column: &str) -> Result<bool, TransformError> {
    flag_or(row, column, false)
}

/// Boolean cell with an explicit value for blank cells.
pub fn flag_or(row: &RawRow, column: &str, blank: bool) -> Result<bool, TransformError> {
    let Some(raw) = cell(row, column) else {
        return Ok(blank);
    };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(TransformError::InvalidBoolean {
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// List cell split on [`LIST_DELIMITER`] (or [`ALT_LIST_DELIMITER`]).
/// Items are trimmed and empty items dropped; blank means an empty list.
pub fn list(row: &RawRow, column: &str) -> Vec<String> {
    let Some(raw) = cell(row, column) else {
        return Vec::new();
    };
    raw.split([LIST_DELIMITER, ALT_LIST_DELIMITER])
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn optional_date(row: &RawRow, column: &str) -> Result<Option<NaiveDate>, TransformError> {
    let Some(raw) = cell(row, column) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map(Some)
        .map_err(|_| TransformError::InvalidDate {
            column: column.to_string(),
            value: raw.to_string(),
        })
}

pub fn required_date(row: &RawRow, column: &str) -> Result<NaiveDate, TransformError> {
    optional_date(row, column)?.ok_or_else(|| TransformError::MissingField {
        column: column.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn text_is_trimmed_and_blank_is_none() {
        let r = row(&[("name", "  Rara Lake "), ("note", "   ")]);
        assert_eq!(optional_text(&r, "name").as_deref(), Some("Rara Lake"));
        assert_eq!(optional_text(&r, "note"), None);
        assert_eq!(optional_text(&r, "absent"), None);
    }

    #[test]
    fn required_text_reports_column() {
        let r = row(&[("name", "")]);
        assert_eq!(
            required_text(&r, "name").unwrap_err().to_string(),
            "missing required value in column 'name'"
        );
    }

    #[test]
    fn numbers_parse_or_name_the_bad_value() {
        let r = row(&[("price", "1200.50"), ("rating", "four")]);
        assert_eq!(optional_f64(&r, "price").unwrap(), Some(1200.5));
        assert_matches!(
            optional_f64(&r, "rating"),
            Err(TransformError::InvalidNumber { ref value, .. }) if value == "four"
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let r = row(&[("price", "NaN")]);
        assert!(optional_f64(&r, "price").is_err());
    }

    #[test]
    fn integers_reject_fractions() {
        let r = row(&[("capacity", "7"), ("seats", "7.5")]);
        assert_eq!(optional_i32(&r, "capacity").unwrap(), Some(7));
        assert_matches!(
            optional_i32(&r, "seats"),
            Err(TransformError::InvalidInteger { .. })
        );
    }

    #[test]
    fn flags_accept_common_spellings() {
        for yes in ["true", "TRUE", "Yes", "y", "1"] {
            assert!(flag(&row(&[("f", yes)]), "f").unwrap(), "{yes}");
        }
        for no in ["false", "No", "n", "0", ""] {
            assert!(!flag(&row(&[("f", no)]), "f").unwrap(), "{no}");
        }
        assert!(!flag(&row(&[]), "f").unwrap());
        assert!(flag_or(&row(&[("f", " ")]), "f", true).unwrap());
        assert_matches!(
            flag(&row(&[("f", "maybe")]), "f"),
            Err(TransformError::InvalidBoolean { .. })
        );
    }

    #[test]
    fn lists_split_on_either_delimiter() {
        let r = row(&[("a", "wifi; parking;;spa "), ("b", "veg|newari"), ("c", "")]);
        assert_eq!(list(&r, "a"), vec!["wifi", "parking", "spa"]);
        assert_eq!(list(&r, "b"), vec!["veg", "newari"]);
        assert!(list(&r, "c").is_empty());
    }

    #[test]
    fn dates_use_iso_format() {
        let r = row(&[("start", "2025-10-02"), ("end", "02/10/2025")]);
        assert_eq!(
            optional_date(&r, "start").unwrap(),
            NaiveDate::from_ymd_opt(2025, 10, 2)
        );
        assert_matches!(
            optional_date(&r, "end"),
            Err(TransformError::InvalidDate { .. })
        );
        assert_matches!(
            required_date(&r, "missing"),
            Err(TransformError::MissingField { .. })
        );
    }
}
