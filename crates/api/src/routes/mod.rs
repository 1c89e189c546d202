pub mod entities;
pub mod health;
pub mod imports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /imports/configs                 list import configs (GET)
/// /imports/{entity}                start an import (POST, multipart or raw CSV)
/// /imports/{entity}/template       download the CSV template (GET)
/// /imports/runs/{id}               import run progress (GET)
///
/// /entities/{entity}               recent rows, for refresh after import (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/imports", imports::router())
        .nest("/entities", entities::router())
}
