//! Café list HTTP microservice.
//!
//! Serves "list cafés in a city" queries from an immutable catalog.
//!
//! # Endpoints
//!
//! - `GET /cafe?city=&count=&search=` - comma-joined `text/plain` list; errors
//!   are `400` with the literal message (`unknown city` / `incorrect count`)
//! - `GET /api/v1/cafes?city=&count=&search=` - JSON list; errors are RFC 9457
//!   problem documents
//!
//! Query strings are decoded leniently: the first value of a repeated key is
//! used, so neither endpoint fails before city and count validation.
//! - `GET /metrics` - Prometheus metrics endpoint (path configurable)
//! - `GET /health/live` - Kubernetes liveness probe
//! - `GET /health/ready` - Kubernetes readiness probe

#![deny(warnings)]

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};

use cafelist_lib::CafeQuery;
use cafelist_service_shared::{
    extract_or_generate_request_id, failure_reason, from_lib_error, health_live, health_ready,
    metrics_handler, plain_error, record_query_failed, record_query_resolved, AppState,
    CafeList, CafeListText, CafeRequest, MetricsLayer, ProblemDetails, ServiceResponse,
};

/// Default path of the Prometheus endpoint.
pub const DEFAULT_METRICS_PATH: &str = "/metrics";

/// JSON response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum JsonResponse {
    Success(ServiceResponse<CafeList>),
    Error(ProblemDetails),
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        match self {
            JsonResponse::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            JsonResponse::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router over `state`.
pub fn router(state: AppState, metrics_path: &str) -> Router {
    Router::new()
        .route("/cafe", get(cafe_handler))
        .route("/api/v1/cafes", get(cafes_json_handler))
        .route(metrics_path, get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(MetricsLayer)
        .with_state(state)
}

/// Handle `GET /cafe`.
async fn cafe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let request_id = extract_or_generate_request_id(&headers);
    let query = CafeQuery::from(pairs.into_iter().collect::<CafeRequest>());

    match state.resolver().resolve(&query) {
        Ok(names) => {
            record_query_resolved(names.len(), "text");
            info!(
                request_id = %request_id,
                city = query.city.as_deref().unwrap_or_default(),
                returned = names.len(),
                "cafe list served"
            );
            CafeListText(names).into_response()
        }
        Err(e) => {
            record_query_failed(failure_reason(&e), "text");
            warn!(request_id = %request_id, error = %e, "cafe query rejected");
            plain_error(&e)
        }
    }
}

/// Handle `GET /api/v1/cafes`.
async fn cafes_json_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> JsonResponse {
    let request_id = extract_or_generate_request_id(&headers);
    let query = CafeQuery::from(pairs.into_iter().collect::<CafeRequest>());

    match state.resolver().resolve(&query) {
        Ok(names) => {
            record_query_resolved(names.len(), "json");
            let city = query.city.unwrap_or_default();
            info!(
                request_id = %request_id,
                city = %city,
                returned = names.len(),
                "cafe list served"
            );
            JsonResponse::Success(ServiceResponse::new(CafeList::new(city, names)))
        }
        Err(e) => {
            record_query_failed(failure_reason(&e), "json");
            warn!(request_id = %request_id, error = %e, "cafe query rejected");
            JsonResponse::Error(from_lib_error(&e, request_id.as_str()))
        }
    }
}
