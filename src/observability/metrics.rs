//! Metrics collection and exposition.
//!
//! # Responsibilities
//! - Define gateway metrics (requests, decisions, redirects, cache)
//! - Expose Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, status
//! - `gateway_request_duration_seconds` (histogram): handler latency
//! - `gateway_decisions_total` (counter): engine decisions by kind
//! - `gateway_redirects_total` (counter): redirects by correction reason
//! - `gateway_parse_cache_hits_total` / `_misses_total` (counters)
//! - `gateway_parse_cache_entries` (gauge): live cache entries
//! - `gateway_fail_open_total` (counter): pipeline errors absorbed
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recording without an installed exporter is a no-op, so the engine
//!   and tests never depend on the exporter being up

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`.
///
/// Failure to bind is logged, not fatal: the gateway keeps serving and
/// all recorders degrade to no-ops.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a completed gateway request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "gateway_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("gateway_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record an engine decision by kind.
pub fn record_decision(kind: &'static str) {
    counter!("gateway_decisions_total", "kind" => kind).increment(1);
}

/// Record a redirect correction reason.
pub fn record_redirect(reason: &'static str) {
    counter!("gateway_redirects_total", "reason" => reason).increment(1);
}

/// Record a parse-cache hit.
pub fn record_cache_hit() {
    counter!("gateway_parse_cache_hits_total").increment(1);
}

/// Record a parse-cache miss.
pub fn record_cache_miss() {
    counter!("gateway_parse_cache_misses_total").increment(1);
}

/// Record the current parse-cache entry count.
pub fn record_cache_size(entries: usize) {
    gauge!("gateway_parse_cache_entries").set(entries as f64);
}

/// Record a pipeline error absorbed by the fail-open boundary.
pub fn record_fail_open() {
    counter!("gateway_fail_open_total").increment(1);
}
