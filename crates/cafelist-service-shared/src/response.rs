//! Response types for successful HTTP responses.
//!
//! Two renderings of a resolved café list are supported:
//! - [`CafeListText`]: the comma-joined `text/plain` body served on `/cafe`
//! - [`ServiceResponse`]`<`[`CafeList`]`>`: the JSON body served on `/api/v1/cafes`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use cafelist_lib::Error as LibError;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Separator placed between café names in plain-text bodies.
pub const NAME_SEPARATOR: &str = ",";

/// Join café names for a plain-text body. An empty list yields an empty string.
pub fn join_names(names: &[String]) -> String {
    names.join(NAME_SEPARATOR)
}

/// Comma-joined plain-text café list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeListText(pub Vec<String>);

impl IntoResponse for CafeListText {
    fn into_response(self) -> Response {
        plain_text(StatusCode::OK, join_names(&self.0))
    }
}

/// Plain-text `400 Bad Request` carrying the library error message verbatim.
pub fn plain_error(error: &LibError) -> Response {
    let status = if error.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    plain_text(status, error.to_string())
}

fn plain_text(status: StatusCode, body: String) -> Response {
    let mut response = (status, body).into_response();
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    response
}

/// JSON payload for a resolved café list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CafeList {
    /// The queried city.
    pub city: String,
    /// Number of cafés returned.
    pub count: usize,
    /// Café names in catalog order.
    pub cafes: Vec<String>,
}

impl CafeList {
    pub fn new(city: impl Into<String>, cafes: Vec<String>) -> Self {
        Self {
            city: city.into(),
            count: cafes.len(),
            cafes,
        }
    }
}

/// Wrapper for successful responses with content type metadata.
///
/// This provides symmetry with `ProblemDetails` by including content type
/// information in the response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// The actual response payload.
    #[serde(flatten)]
    pub data: T,

    /// Content type for this response.
    pub content_type: String,
}

impl<T> ServiceResponse<T> {
    /// Create a new successful response with the default content type.
    pub fn new(data: T) -> Self {
        Self {
            data,
            content_type: "application/json".to_string(),
        }
    }
}

impl<T> From<T> for ServiceResponse<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
