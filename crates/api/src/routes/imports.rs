use axum::routing::{get, post};
use axum::Router;

use crate::handlers::imports;
use crate::state::AppState;

/// Routes mounted at `/api/v1/imports`.
///
/// ```text
/// GET  /configs             list_configs
/// POST /{entity}            start_import
/// GET  /{entity}/template   download_template
/// GET  /runs/{id}           get_run
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/configs", get(imports::list_configs))
        .route("/{entity}", post(imports::start_import))
        .route("/{entity}/template", get(imports::download_template))
        .route("/runs/{id}", get(imports::get_run))
}
