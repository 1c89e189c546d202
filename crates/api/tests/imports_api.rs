//! Integration tests for the bulk import endpoints.

mod common;

use axum::http::StatusCode;
use batohi_core::entities::EntityKind;
use batohi_events::EVENT_ENTITY_IMPORTED;
use common::{
    body_bytes, body_json, build_test_app, get, places_csv, post_csv, post_multipart, test_config,
    wait_for_run,
};

// ---------------------------------------------------------------------------
// Configs and templates
// ---------------------------------------------------------------------------

#[tokio::test]
async fn configs_list_every_importable_entity() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/imports/configs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let keys: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["places", "hotels", "restaurants", "festivals", "vehicles"]);
    assert_eq!(json["data"][0]["field_names"][0], "name");
    assert_eq!(json["data"][1]["target_collection"], "hotels");
}

#[tokio::test]
async fn template_is_a_csv_attachment() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/imports/hotels/template").await;
    assert_eq!(response.status(), StatusCode::OK);

    let headers = response.headers().clone();
    assert!(headers["content-type"].to_str().unwrap().starts_with("text/csv"));
    assert_eq!(
        headers["content-disposition"],
        "attachment; filename=\"hotels_template.csv\""
    );

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    let header_line = body.lines().next().unwrap();
    assert!(header_line.starts_with("name,"));
    assert!(body.lines().count() >= 2, "template should carry a sample row");
}

#[tokio::test]
async fn template_for_unknown_entity_is_404() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/imports/admins/template").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_ENTITY");
}

// ---------------------------------------------------------------------------
// Running imports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn raw_csv_import_runs_to_completion() {
    let app = build_test_app(test_config());
    let response = post_csv(app.router.clone(), "/api/v1/imports/places", places_csv(25, &[4])).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let started = body_json(response).await;
    assert_eq!(started["data"]["entity"], "places");
    assert_eq!(started["data"]["total"], 25);
    let run_id = started["data"]["id"].as_str().unwrap().to_string();

    let run = wait_for_run(&app.router, &run_id).await;
    assert_eq!(run["processed"], 25);
    assert_eq!(run["success"], 24);
    assert_eq!(run["failed"], 1);
    assert_eq!(run["outcome"], "partial");
    assert_eq!(run["refresh_required"], true);
    assert_eq!(
        run["errors"][0],
        "Row 4: invalid number in column 'entry_fee': 'abc'"
    );

    let sizes: Vec<usize> = app.store.calls().iter().map(|c| c.records.len()).collect();
    assert_eq!(sizes, vec![9, 10, 5]);
    assert!(!app.state.imports.is_active(EntityKind::Places));
}

#[tokio::test]
async fn multipart_upload_uses_the_file_field() {
    let app = build_test_app(test_config());
    let csv = "name,vehicle_type,capacity\nHiace 1,van,14\nScorpio,jeep,7\n";
    let response = post_multipart(app.router.clone(), "/api/v1/imports/vehicles", "file", csv).await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let run_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let run = wait_for_run(&app.router, &run_id).await;
    assert_eq!(run["success"], 2);
    assert_eq!(run["outcome"], "succeeded");
    assert_eq!(app.store.stored("vehicles").len(), 2);
}

#[tokio::test]
async fn multipart_without_file_field_is_400() {
    let app = build_test_app(test_config());
    let response =
        post_multipart(app.router, "/api/v1/imports/places", "attachment", "name\nA\n").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Missing multipart field 'file'");
}

#[tokio::test]
async fn malformed_csv_is_400_and_inserts_nothing() {
    let app = build_test_app(test_config());
    let response = post_csv(
        app.router,
        "/api/v1/imports/places",
        "name,district\n\"Unclosed,Kaski\n",
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "CSV_PARSE_ERROR");
    assert!(json["error"].as_str().unwrap().starts_with("CSV parse error: "));
    assert!(app.store.calls().is_empty());
    assert!(!app.state.imports.is_active(EntityKind::Places));
}

#[tokio::test]
async fn unknown_entity_is_404_before_parsing() {
    let app = build_test_app(test_config());
    let response = post_csv(app.router, "/api/v1/imports/admins", "\"not csv").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.store.calls().is_empty());
}

#[tokio::test]
async fn header_only_file_completes_as_empty() {
    let app = build_test_app(test_config());
    let response = post_csv(app.router.clone(), "/api/v1/imports/festivals", "name,start_date\n").await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let run_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let run = wait_for_run(&app.router, &run_id).await;
    assert_eq!(run["total"], 0);
    assert_eq!(run["outcome"], "empty");
    assert_eq!(run["refresh_required"], false);
    assert!(app.store.calls().is_empty());
}

#[tokio::test]
async fn second_import_for_busy_entity_is_409() {
    let app = build_test_app(test_config());
    app.state.imports.begin(EntityKind::Hotels, 10).unwrap();

    let response = post_csv(app.router, "/api/v1/imports/hotels", "name\nHotel Barahi\n").await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
    assert!(app.store.calls().is_empty());
}

#[tokio::test]
async fn oversized_upload_is_413() {
    let mut config = test_config();
    config.max_upload_bytes = 256;
    let app = build_test_app(config);

    let response = post_csv(app.router, "/api/v1/imports/places", places_csv(50, &[])).await;
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn completed_import_publishes_refresh_event() {
    let app = build_test_app(test_config());
    let mut events = app.state.event_bus.subscribe();

    let response = post_csv(app.router.clone(), "/api/v1/imports/places", places_csv(3, &[2])).await;
    let run_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    wait_for_run(&app.router, &run_id).await;

    let event = events.recv().await.unwrap();
    assert_eq!(event.event_type, EVENT_ENTITY_IMPORTED);
    assert_eq!(event.source_entity_type.as_deref(), Some("places"));
    assert_eq!(event.payload["inserted"], 2);
    assert_eq!(event.payload["failed"], 1);
}

#[tokio::test]
async fn fully_failed_import_publishes_nothing() {
    let app = build_test_app(test_config());
    let mut events = app.state.event_bus.subscribe();

    let response = post_csv(app.router.clone(), "/api/v1/imports/places", places_csv(2, &[1, 2])).await;
    let run_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let run = wait_for_run(&app.router, &run_id).await;

    assert_eq!(run["outcome"], "failed");
    assert!(events.try_recv().is_err());
}

// ---------------------------------------------------------------------------
// Run lookup
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_run_is_404() {
    let app = build_test_app(test_config());
    let response = get(
        app.router,
        "/api/v1/imports/runs/0190a2b4-0000-7000-8000-000000000000",
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_run_id_is_400() {
    let app = build_test_app(test_config());
    let response = get(app.router, "/api/v1/imports/runs/not-a-uuid").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expired_run_is_404() {
    let app = build_test_app(test_config());
    let response = post_csv(app.router.clone(), "/api/v1/imports/places", places_csv(2, &[])).await;
    let run_id = body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    wait_for_run(&app.router, &run_id).await;

    assert_eq!(app.state.imports.purge_finished_before(chrono::Utc::now()), 1);

    let response = get(app.router, &format!("/api/v1/imports/runs/{run_id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
