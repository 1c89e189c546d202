//! Downloadable CSV templates for bulk import.
//!
//! A template is the config's `field_names` header followed by its sample
//! rows. Generation is deterministic and needs no I/O.

use csv::{Terminator, WriterBuilder};

use crate::error::CoreError;
use crate::import_config::{require_config, ImportConfig};

/// MIME type of generated templates.
pub const CSV_CONTENT_TYPE: &str = "text/csv";

/// A rendered template ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvTemplate {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Template download filename for an entity key.
pub fn template_filename(key: &str) -> String {
    format!("{key}_template.csv")
}

/// Render the header and sample rows of `config` as CSV bytes.
///
/// Sample cells are placed under their matching header; columns a sample
/// row does not mention are left empty.
pub fn render_template(config: &ImportConfig) -> csv::Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(config.field_names)?;
    for sample in config.sample_rows {
        let record = config.field_names.iter().map(|field| {
            sample
                .iter()
                .find(|(column, _)| column == field)
                .map(|(_, value)| *value)
                .unwrap_or("")
        });
        writer.write_record(record)?;
    }

    writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))
}

/// Template for an entity key.
///
/// Fails with [`CoreError::UnknownEntity`] when the key is not registered.
pub fn template_for(key: &str) -> Result<CsvTemplate, CoreError> {
    let config = require_config(key)?;
    let bytes = render_template(config).map_err(|e| CoreError::Template(e.to_string()))?;
    Ok(CsvTemplate {
        filename: template_filename(config.key()),
        content_type: CSV_CONTENT_TYPE,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    use crate::csv_rows::parse_rows;
    use crate::import_config::all_configs;

    #[test]
    fn filename_follows_key() {
        let template = template_for("hotels").unwrap();
        assert_eq!(template.filename, "hotels_template.csv");
        assert_eq!(template.content_type, "text/csv");
    }

    #[test]
    fn unknown_key_renders_nothing() {
        assert_matches!(template_for("admins"), Err(CoreError::UnknownEntity(_)));
    }

    #[test]
    fn header_matches_field_names() {
        let template = template_for("festivals").unwrap();
        let text = String::from_utf8(template.bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(
            header,
            "name,description,start_date,end_date,location,significance,images,is_public_holiday"
        );
    }

    #[test]
    fn repeated_downloads_are_identical() {
        for config in all_configs() {
            let first = template_for(config.key()).unwrap();
            let second = template_for(config.key()).unwrap();
            assert_eq!(first.bytes, second.bytes);
        }
    }

    #[test]
    fn templates_import_cleanly() {
        for config in all_configs() {
            let rows = parse_rows(&render_template(config).unwrap()).unwrap();
            assert_eq!(rows.len(), config.sample_rows.len());
            for row in &rows {
                config.transform(row).unwrap();
            }
        }
    }

    #[test]
    fn cells_with_commas_are_quoted() {
        let text = String::from_utf8(template_for("places").unwrap().bytes).unwrap();
        assert!(text.contains("\"Lakeside, Pokhara\""));
    }
}
