//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_requests_total` (counter): `/api` requests by route, status
//! - `relay_request_duration_seconds` (histogram): `/api` latency by route
//! - `relay_webhook_events_total` (counter): webhook events by outcome
//! - `relay_dispatch_total` (counter): reply deliveries by outcome
//!
//! Recording is a no-op until a recorder is installed, so tests and
//! metrics-disabled deployments pay nothing.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one API request, labelled by matched route.
pub fn record_request(route: String, status: u16, start: Instant) {
    counter!("relay_requests_total", "route" => route.clone(), "status" => status.to_string())
        .increment(1);
    histogram!("relay_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

pub fn record_webhook_event(outcome: &'static str) {
    counter!("relay_webhook_events_total", "outcome" => outcome).increment(1);
}

pub fn record_dispatch(outcome: &'static str) {
    counter!("relay_dispatch_total", "outcome" => outcome).increment(1);
}
