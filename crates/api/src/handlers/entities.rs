//! Read-side listing used to refresh entity tables after an import.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use batohi_core::entities::EntityKind;
use batohi_core::error::CoreError;
use batohi_db::repositories::{FestivalRepo, HotelRepo, PlaceRepo, RestaurantRepo, VehicleRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Rows returned when no `limit` is given.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Upper bound on `limit`.
pub const MAX_LIST_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

impl ListParams {
    fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LIST_LIMIT)
            .clamp(1, MAX_LIST_LIMIT)
    }
}

/// GET /api/v1/entities/{entity}?limit=N
pub async fn list_entities(
    State(state): State<AppState>,
    Path(entity): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<Response> {
    let kind = EntityKind::from_str(&entity).ok_or(CoreError::UnknownEntity(entity))?;
    let limit = params.limit();
    let pool = &state.pool;

    let response = match kind {
        EntityKind::Places => {
            Json(DataResponse { data: PlaceRepo::list(pool, limit).await? }).into_response()
        }
        EntityKind::Hotels => {
            Json(DataResponse { data: HotelRepo::list(pool, limit).await? }).into_response()
        }
        EntityKind::Restaurants => {
            Json(DataResponse { data: RestaurantRepo::list(pool, limit).await? }).into_response()
        }
        EntityKind::Festivals => {
            Json(DataResponse { data: FestivalRepo::list(pool, limit).await? }).into_response()
        }
        EntityKind::Vehicles => {
            Json(DataResponse { data: VehicleRepo::list(pool, limit).await? }).into_response()
        }
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_clamps() {
        assert_eq!(ListParams { limit: None }.limit(), DEFAULT_LIST_LIMIT);
        assert_eq!(ListParams { limit: Some(0) }.limit(), 1);
        assert_eq!(ListParams { limit: Some(10_000) }.limit(), MAX_LIST_LIMIT);
        assert_eq!(ListParams { limit: Some(25) }.limit(), 25);
    }
}
