//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_router_decisions_total` (counter): routing outcomes by `outcome`, `locale`
//! - `gateway_upstream_requests_total` (counter): forwarded requests by `status`
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - Labels stay low-cardinality: locale codes and status codes only

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Start the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one locale routing decision. `locale` is empty for bypassed requests.
pub fn record_decision(outcome: &'static str, locale: &str) {
    counter!(
        "locale_router_decisions_total",
        "outcome" => outcome,
        "locale" => locale.to_string()
    )
    .increment(1);
}

/// Record a forwarded request and its latency.
pub fn record_upstream(status: u16, start: Instant) {
    counter!("gateway_upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("gateway_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}
