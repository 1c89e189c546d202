use axum::routing::get;
use axum::Router;

use crate::handlers::entities;
use crate::state::AppState;

/// Routes mounted at `/api/v1/entities`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{entity}", get(entities::list_entities))
}
