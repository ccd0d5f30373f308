//! Shared infrastructure for the café list HTTP service.
//!
//! This crate provides the HTTP glue around `cafelist-lib`:
//!
//! - [`AppState`]: The loaded catalog and its query resolver
//! - [`health`]: Health check handlers for Kubernetes liveness/readiness probes
//! - [`ProblemDetails`]: RFC 9457 Problem Details for JSON error responses
//! - [`CafeListText`] / [`ServiceResponse`]: plain-text and JSON success bodies
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`CafeRequest`]: Query-string parameters of a café list request
//!
//! # Architecture
//!
//! Handlers stay thin; validation, filtering and capping live in
//! `cafelist-lib`:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Decode query string into CafeRequest                     │
//! │  - Call QueryResolver::resolve                              │
//! │  - Render names (text or JSON) or the error                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides catalog fixtures for handler testing.
//! Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use health::{health_live, health_ready, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    failure_reason, init_metrics, metrics_handler, record_query_failed, record_query_resolved,
    MetricsConfig, MetricsError,
};
pub use middleware::{extract_or_generate_request_id, MetricsLayer, RequestId, REQUEST_ID_HEADER};
pub use problem::{
    from_lib_error, ProblemDetails, PROBLEM_INCORRECT_COUNT, PROBLEM_INTERNAL_ERROR,
    PROBLEM_UNKNOWN_CITY,
};
pub use request::CafeRequest;
pub use response::{join_names, plain_error, CafeList, CafeListText, ServiceResponse, NAME_SEPARATOR};
pub use state::{AppState, AppStateError};
