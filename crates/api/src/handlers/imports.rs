//! Handlers for bulk CSV import.
//!
//! Provides endpoints for listing import configs, downloading templates,
//! uploading a file to start a run, and polling a run's progress.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Path, Request, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use batohi_core::csv_rows::parse_rows;
use batohi_core::import_config::{all_configs, require_config};
use batohi_core::template::template_for;
use serde::Serialize;
use uuid::Uuid;

use crate::background::import_runs::{spawn_import, TrackedRun};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the CSV file.
pub const UPLOAD_FIELD: &str = "file";

/// Typed summary of one import config for the import dialog.
#[derive(Debug, Serialize)]
pub struct ImportConfigSummary {
    pub key: &'static str,
    pub label: &'static str,
    pub target_collection: &'static str,
    pub field_names: &'static [&'static str],
}

// ── Configs ──────────────────────────────────────────────────────────

/// GET /api/v1/imports/configs
pub async fn list_configs() -> Json<DataResponse<Vec<ImportConfigSummary>>> {
    let data = all_configs()
        .iter()
        .map(|c| ImportConfigSummary {
            key: c.key(),
            label: c.label,
            target_collection: c.target_collection,
            field_names: c.field_names,
        })
        .collect();
    Json(DataResponse { data })
}

// ── Template ─────────────────────────────────────────────────────────

/// GET /api/v1/imports/{entity}/template
///
/// Serves `{entity}_template.csv` as an attachment.
pub async fn download_template(Path(entity): Path<String>) -> AppResult<Response> {
    let template = template_for(&entity)?;
    let disposition = format!("attachment; filename=\"{}\"", template.filename);

    Ok((
        [
            (CONTENT_TYPE, format!("{}; charset=utf-8", template.content_type)),
            (CONTENT_DISPOSITION, disposition),
        ],
        template.bytes,
    )
        .into_response())
}

// ── Start Import ─────────────────────────────────────────────────────

/// POST /api/v1/imports/{entity}
///
/// Accepts the file as a multipart `file` field or as the raw request body.
/// The whole file is parsed before anything is written; a malformed file
/// is rejected with 400 and no run is created. Otherwise the run starts in
/// the background and the response carries its id and initial progress.
pub async fn start_import(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    request: Request,
) -> AppResult<(StatusCode, Json<DataResponse<TrackedRun>>)> {
    let config = require_config(&entity)?;
    let data = read_upload(request).await?;
    let rows = parse_rows(&data)?;

    let run = state.imports.begin(config.kind, rows.len())?;
    tracing::info!(
        run_id = %run.id,
        entity = config.key(),
        rows = rows.len(),
        bytes = data.len(),
        "Import run started"
    );

    spawn_import(
        state.pipeline.clone(),
        Arc::clone(&state.imports),
        Arc::clone(&state.event_bus),
        config,
        run.id,
        rows,
    );

    Ok((StatusCode::ACCEPTED, Json(DataResponse { data: run })))
}

/// Pull the file bytes out of a multipart form or a raw body.
async fn read_upload(request: Request) -> AppResult<Bytes> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        return Bytes::from_request(request, &())
            .await
            .map_err(|e| body_error(e.status(), e.body_text()));
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| body_error(e.status(), e.body_text()))?
    {
        if field.name() == Some(UPLOAD_FIELD) {
            return field
                .bytes()
                .await
                .map_err(|e| body_error(e.status(), e.body_text()));
        }
    }

    Err(AppError::BadRequest(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}

fn body_error(status: StatusCode, message: String) -> AppError {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(message)
    } else {
        AppError::BadRequest(message)
    }
}

// ── Run Status ───────────────────────────────────────────────────────

/// GET /api/v1/imports/runs/{id}
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DataResponse<TrackedRun>>> {
    let run = state
        .imports
        .get(id)
        .ok_or_else(|| AppError::NotFound(format!("Import run {id} not found")))?;
    Ok(Json(DataResponse { data: run }))
}
