//! Per-request metrics for the browser-facing API.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

const UNMATCHED: &str = "unmatched";

/// Record `relay_requests_total` and latency for every response, including
/// the ones the relay produces itself (400, 401, 405, 500).
pub async fn track_requests(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED.to_string());

    let response = next.run(req).await;
    metrics::record_request(route, response.status().as_u16(), start);
    response
}
