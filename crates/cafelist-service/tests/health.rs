use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use cafelist_lib::Catalog;
use cafelist_service::{router, DEFAULT_METRICS_PATH};
use cafelist_service_shared::test_utils::test_state;
use cafelist_service_shared::AppState;

#[tokio::test]
async fn liveness_reports_ok() {
    let server = TestServer::new(router(test_state(), DEFAULT_METRICS_PATH)).unwrap();
    let response = server.get("/health/live").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn readiness_reports_catalog_size() {
    let server = TestServer::new(router(test_state(), DEFAULT_METRICS_PATH)).unwrap();
    let response = server.get("/health/ready").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["cities_loaded"], 2);
    assert_eq!(body["cafes_loaded"], 8);
}

#[tokio::test]
async fn readiness_fails_without_cities() {
    let state = AppState::from_catalog(Catalog::default());
    let server = TestServer::new(router(state, DEFAULT_METRICS_PATH)).unwrap();
    let response = server.get("/health/ready").await;

    assert_eq!(response.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn metrics_endpoint_honors_configured_path() {
    let server = TestServer::new(router(test_state(), "/internal/metrics")).unwrap();

    server.get("/internal/metrics").await.assert_status_ok();
    assert_eq!(
        server.get("/metrics").await.status_code(),
        StatusCode::NOT_FOUND
    );
}
