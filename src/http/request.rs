//! Request identification.
//!
//! Every request gets an `x-request-id` (UUID v4) before tracing starts, so
//! the id shows up on the request span and on every log line inside it. The
//! same id is echoed back to the caller.

use axum::{body::Body, http::Request};
use tracing::Span;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Span factory for `TraceLayer`, carrying the request id.
pub fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
