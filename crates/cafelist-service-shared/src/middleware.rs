//! Request correlation and HTTP metrics middleware.
//!
//! [`MetricsLayer`] wraps the whole router. For every request it:
//!
//! 1. takes the `X-Request-ID` header, or mints a UUID v7 when it is absent,
//!    empty, or not UTF-8, and writes the chosen ID back into the request
//!    headers so handlers read the same value;
//! 2. opens a `request` span carrying the ID, method and path;
//! 3. on completion records `http_requests_total`,
//!    `http_request_duration_seconds` and the request/response size
//!    histograms, and echoes the ID in the response.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use http::{header, HeaderMap, HeaderName, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

/// Header carrying the request correlation ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Correlation ID of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

impl RequestId {
    /// Fresh UUID v7 ID.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0).ok()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the caller's `X-Request-ID`, or generate one.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    match headers.get(&REQUEST_ID_HEADER).map(HeaderValue::to_str) {
        Some(Ok(id)) if !id.is_empty() => RequestId(id.to_owned()),
        _ => RequestId::generate(),
    }
}

/// Strip the query string from a request path for metric labels.
pub fn normalize_path(path: &str) -> &str {
    match path.split_once('?') {
        Some((path, _)) => path,
        None => path,
    }
}

fn status_bucket(status: u16) -> &'static str {
    match status / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers.get(header::CONTENT_LENGTH)?.to_str().ok()?.parse().ok()
}

/// Metric labels shared by every series a request contributes to.
#[derive(Debug, Clone)]
struct RouteLabels {
    method: String,
    path: String,
}

impl RouteLabels {
    fn of<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().to_string(),
            path: normalize_path(req.uri().path()).to_owned(),
        }
    }

    fn observe_size(&self, name: &'static str, headers: &HeaderMap) {
        if let Some(size) = content_length(headers) {
            metrics::histogram!(name, "method" => self.method.clone(), "path" => self.path.clone())
                .record(size);
        }
    }

    fn observe_duration(&self, secs: f64) {
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.clone(),
            "path" => self.path.clone()
        )
        .record(secs);
    }

    fn count(&self, bucket: &'static str) {
        metrics::counter!(
            "http_requests_total",
            "method" => self.method.clone(),
            "path" => self.path.clone(),
            "status" => bucket
        )
        .increment(1);
    }
}

/// Tower layer adding request IDs, request spans and HTTP metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

/// Service produced by [`MetricsLayer`].
#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send,
    ReqBody: http_body::Body + Send + 'static,
    ResBody: http_body::Body + Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let start = Instant::now();
        let labels = RouteLabels::of(&req);
        labels.observe_size("http_request_size_bytes", req.headers());

        let request_id = extract_or_generate_request_id(req.headers());
        if let Some(value) = request_id.header_value() {
            req.headers_mut().insert(REQUEST_ID_HEADER.clone(), value);
        }

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %labels.method,
            path = %labels.path,
        );
        span.in_scope(|| tracing::debug!("request received"));

        MetricsFuture {
            inner: self.inner.call(req),
            start,
            labels,
            request_id,
            span,
        }
    }
}

pin_project! {
    /// Response future of [`MetricsMiddleware`].
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        start: Instant,
        labels: RouteLabels,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    ResBody: http_body::Body,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = std::task::ready!(this.inner.poll(cx));

        let elapsed = this.start.elapsed().as_secs_f64();
        this.labels.observe_duration(elapsed);

        match &mut result {
            Ok(response) => {
                let status = response.status().as_u16();
                this.labels.count(status_bucket(status));
                this.labels
                    .observe_size("http_response_size_bytes", response.headers());

                if let Some(value) = this.request_id.header_value() {
                    response
                        .headers_mut()
                        .insert(REQUEST_ID_HEADER.clone(), value);
                }

                tracing::info!(status, latency_ms = elapsed * 1000.0, "request completed");
            }
            Err(_) => {
                this.labels.count("5xx");
                tracing::error!(latency_ms = elapsed * 1000.0, "request failed");
            }
        }

        Poll::Ready(result)
    }
}
