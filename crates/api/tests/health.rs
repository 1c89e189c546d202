//! Integration tests for the health check endpoint and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use batohi_core::entities::EntityKind;
use common::{body_json, build_test_app, get, test_config};

// ---------------------------------------------------------------------------
// Test: GET /health reports a degraded database without failing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_reports_unreachable_database() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert!(json["version"].is_string());
    assert_eq!(json["db_healthy"], false);
    assert_eq!(json["active_imports"], 0);
}

#[tokio::test]
async fn health_check_counts_active_imports() {
    let app = build_test_app(test_config());
    app.state.imports.begin(EntityKind::Restaurants, 4).unwrap();

    let json = body_json(get(app.router, "/health").await).await;
    assert_eq!(json["active_imports"], 1);
}

// ---------------------------------------------------------------------------
// Test: Unknown route returns 404
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: x-request-id header is present in response
// ---------------------------------------------------------------------------

#[tokio::test]
async fn response_contains_x_request_id_header() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/imports/configs").await;

    assert_eq!(response.status(), StatusCode::OK);

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("Response must contain an x-request-id header");

    // The value should be a valid UUID (36 chars with hyphens).
    assert_eq!(request_id.to_str().unwrap().len(), 36);
}

// ---------------------------------------------------------------------------
// Test: entity listing rejects unknown entities without touching the database
// ---------------------------------------------------------------------------

#[tokio::test]
async fn listing_unknown_entity_is_404() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/entities/admins").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_ENTITY");
}
