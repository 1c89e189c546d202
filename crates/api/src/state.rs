use std::sync::Arc;

use batohi_pipeline::ImportPipeline;

use crate::background::import_runs::ImportTracker;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: batohi_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Bulk import pipeline bound to the record store and batch size.
    pub pipeline: ImportPipeline,
    /// Runs in progress and recently finished.
    pub imports: Arc<ImportTracker>,
    /// Centralized event bus for publishing platform events.
    pub event_bus: Arc<batohi_events::EventBus>,
}
