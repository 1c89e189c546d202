//! Batohi core domain.
//!
//! Pure types and logic for the admin bulk import: entity record shapes,
//! cell conversions, per-entity import configs, CSV ingestion, template
//! generation, and the [`store::RecordStore`] persistence boundary.
//! Nothing in this crate touches the database or HTTP.

pub mod cells;
pub mod csv_rows;
pub mod entities;
pub mod error;
pub mod import_config;
pub mod store;
pub mod template;
pub mod types;
