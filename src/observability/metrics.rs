//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): dispatched requests by action, status
//! - `gateway_request_duration_seconds` (histogram): dispatch latency
//! - `gateway_rewrite_duration_seconds` (histogram): envelope rewrite time,
//!   labeled by outcome (`ok` / `rejected`)

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Start the Prometheus exporter on the given address.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics exporter"),
    }
}

/// Record a dispatched (or rejected-at-dispatch) request.
pub fn record_request(action: &str, status: u16, start: Instant) {
    let labels = [
        ("action", action.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("gateway_requests_total", &labels).increment(1);
    metrics::histogram!("gateway_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record an envelope rewrite attempt.
pub fn record_rewrite(outcome: &str, start: Instant) {
    metrics::histogram!(
        "gateway_rewrite_duration_seconds",
        "outcome" => outcome.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}
