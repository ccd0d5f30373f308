use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use cafelist_service::{router, DEFAULT_METRICS_PATH};
use cafelist_service_shared::test_utils::{builtin_cities, fixture_state, test_state};
use cafelist_service_shared::{PROBLEM_INCORRECT_COUNT, PROBLEM_UNKNOWN_CITY};

fn server() -> TestServer {
    TestServer::new(router(test_state(), DEFAULT_METRICS_PATH)).expect("test server starts")
}

#[tokio::test]
async fn returns_json_list() {
    let server = server();
    let response = server
        .get("/api/v1/cafes")
        .add_query_param("city", builtin_cities::MOSCOW)
        .add_query_param("search", "кофе")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["city"], "moscow");
    assert_eq!(body["count"], 2);
    assert_eq!(body["cafes"][0], "Мир кофе");
    assert_eq!(body["cafes"][1], "Кофе и завтраки");
    assert_eq!(body["content_type"], "application/json");
}

#[tokio::test]
async fn empty_result_is_success() {
    let server = server();
    let response = server
        .get("/api/v1/cafes")
        .add_query_param("city", builtin_cities::TULA)
        .add_query_param("count", 0)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["count"], 0);
    assert_eq!(body["cafes"], Value::Array(Vec::new()));
}

#[tokio::test]
async fn unknown_city_is_a_problem_document() {
    let server = server();
    let response = server
        .get("/api/v1/cafes")
        .add_query_param("city", "moskow")
        .add_query_param("count", "na")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.header(axum::http::header::CONTENT_TYPE),
        "application/problem+json"
    );

    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_UNKNOWN_CITY);
    assert_eq!(body["status"], 400);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("unknown city"));
    assert!(detail.contains("moscow"), "suggestion expected in {detail}");
    assert!(body["instance"].as_str().is_some());
}

#[tokio::test]
async fn incorrect_count_is_a_problem_document() {
    let server = server();
    let response = server
        .get("/api/v1/cafes")
        .add_query_param("city", builtin_cities::TULA)
        .add_query_param("count", "-3")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_INCORRECT_COUNT);
    assert!(body["detail"].as_str().unwrap().starts_with("incorrect count"));
}

#[tokio::test]
async fn serves_catalog_loaded_from_file() {
    let server = TestServer::new(router(fixture_state(), DEFAULT_METRICS_PATH))
        .expect("test server starts");

    let response = server
        .get("/api/v1/cafes")
        .add_query_param("city", "kazan")
        .add_query_param("count", 2)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["cafes"][0], "Чак-чак");
    assert_eq!(body["cafes"][1], "Кофейня на Баумана");

    let response = server
        .get("/cafe")
        .add_query_param("city", builtin_cities::MOSCOW)
        .await;
    assert_eq!(response.text(), "unknown city");
}

#[tokio::test]
async fn repeated_count_reports_incorrect_count_problem() {
    let server = server();
    let response = server.get("/api/v1/cafes?city=tula&count=na&count=2").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["type"], PROBLEM_INCORRECT_COUNT);
}
