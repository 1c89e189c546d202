//! CSV ingestion for bulk import.
//!
//! The uploaded file is parsed once, up front, into an ordered list of
//! [`RawRow`]s keyed by the header line. Parsing is all-or-nothing: any
//! malformed input yields a single [`CsvError`] and no rows.

use std::collections::BTreeMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;

use crate::error::CsvError;

/// One data row of an uploaded file, as `header -> cell` strings.
///
/// Columns the entity does not know about are kept; transforms ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RawRow(BTreeMap<String, String>);

impl RawRow {
    /// Cell value for `column`, if the column exists in the file.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parse raw file bytes into rows, using the first record as headers.
///
/// - Input must be UTF-8; a leading byte-order mark is ignored.
/// - Blank lines (including lines of only separators/whitespace) are skipped.
/// - A data row whose field count differs from the header is malformed.
/// - An unterminated quoted field is malformed.
///
/// A header-only file is valid and yields an empty list.
pub fn parse_rows(data: &[u8]) -> Result<Vec<RawRow>, CsvError> {
    let text = std::str::from_utf8(data).map_err(|e| CsvError::InvalidUtf8(e.to_string()))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if let Some(line) = unterminated_quote_line(text) {
        return Err(CsvError::Malformed {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(str::to_string)
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(CsvError::MissingHeader);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        if is_blank(&record) {
            continue;
        }
        if record.len() != headers.len() {
            return Err(CsvError::Malformed {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                message: format!(
                    "expected {} fields but found {}",
                    headers.len(),
                    record.len()
                ),
            });
        }
        rows.push(
            headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.to_string()))
                .collect(),
        );
    }

    Ok(rows)
}

fn malformed(err: csv::Error) -> CsvError {
    CsvError::Malformed {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        message: err.to_string(),
    }
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Line (1-based) on which a quoted field opens without ever closing.
///
/// The csv reader silently runs an open quote to end-of-file, so this is
/// checked separately. A quote opens a field only as its first character;
/// anywhere else it is literal. Doubled quotes inside a quoted field are
/// escapes.
fn unterminated_quote_line(text: &str) -> Option<u64> {
    let mut in_quotes = false;
    let mut field_start = true;
    let mut line: u64 = 1;
    let mut opened_at: u64 = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            line += 1;
        }
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            continue;
        }
        match ch {
            '"' if field_start => {
                in_quotes = true;
                opened_at = line;
                field_start = false;
            }
            ',' | '\n' | '\r' => field_start = true,
            _ => field_start = false,
        }
    }

    in_quotes.then_some(opened_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_rows_keyed_by_header() {
        let rows = parse_rows(b"name,city\nYak Inn,Pokhara\nHimal Lodge,Namche\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Yak Inn"));
        assert_eq!(rows[1].get("city"), Some("Namche"));
    }

    #[test]
    fn header_only_yields_no_rows() {
        let rows = parse_rows(b"name,city\n").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let rows = parse_rows(b"name,city\n\nA,B\n,\n\nC,D\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("name"), Some("C"));
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let rows = parse_rows(b"name,description\n\"Stupa\",\"Old, \"\"white\"\"\nand round\"\n")
            .unwrap();
        assert_eq!(rows[0].get("description"), Some("Old, \"white\"\nand round"));
    }

    #[test]
    fn headers_are_trimmed() {
        let rows = parse_rows(b" name , city \nA,B\n").unwrap();
        assert_eq!(rows[0].get("name"), Some("A"));
        assert_eq!(rows[0].get("city"), Some("B"));
    }

    #[test]
    fn leading_bom_is_ignored() {
        let rows = parse_rows("\u{feff}name\nA\n".as_bytes()).unwrap();
        assert_eq!(rows[0].get("name"), Some("A"));
    }

    #[test]
    fn unterminated_quote_is_fatal() {
        let err = parse_rows(b"name,city\nA,B\n\"Broken,C\nD,E\n").unwrap_err();
        assert_matches!(err, CsvError::Malformed { line: 3, .. });
    }

    #[test]
    fn quote_inside_unquoted_field_is_literal() {
        let rows = parse_rows(b"name,description\nTV,12\" screen\nRadio,ok\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("description"), Some("12\" screen"));
        assert_eq!(rows[1].get("name"), Some("Radio"));

        let rows = parse_rows(b"a,b,c\nA,5\" x,\"Lake, ok\"\n").unwrap();
        assert_eq!(rows[0].get("b"), Some("5\" x"));
        assert_eq!(rows[0].get("c"), Some("Lake, ok"));
    }

    #[test]
    fn unterminated_quote_after_literal_quote_is_fatal() {
        let err = parse_rows(b"a,b\nA,5\" x\nB,\"open\n").unwrap_err();
        assert_matches!(err, CsvError::Malformed { line: 3, .. });
    }

    #[test]
    fn ragged_row_is_fatal() {
        let err = parse_rows(b"name,city\nA,B\nC\n").unwrap_err();
        assert_matches!(err, CsvError::Malformed { line: 3, .. });
    }

    #[test]
    fn invalid_utf8_is_fatal() {
        let err = parse_rows(&[b'n', b'\n', 0xff, 0xfe]).unwrap_err();
        assert_matches!(err, CsvError::InvalidUtf8(_));
    }

    #[test]
    fn empty_file_has_no_header() {
        assert_matches!(parse_rows(b""), Err(CsvError::MissingHeader));
    }

    #[test]
    fn unknown_columns_pass_through() {
        let rows = parse_rows(b"name,internal_note\nA,hello\n").unwrap();
        assert_eq!(rows[0].get("internal_note"), Some("hello"));
    }
}
