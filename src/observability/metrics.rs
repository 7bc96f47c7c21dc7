//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_search_requests_total` (counter): searches by outcome, status
//! - `relay_search_duration_seconds` (histogram): latency by outcome
//!
//! Without an installed recorder every update is a no-op, so handlers
//! record unconditionally.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr, app_name: &str) -> Result<(), BuildError> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .add_global_label("service", app_name)
        .install()?;

    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one completed search.
pub fn record_search(outcome: &'static str, status: u16, start: Instant) {
    let elapsed = start.elapsed().as_secs_f64();

    metrics::counter!(
        "relay_search_requests_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("relay_search_duration_seconds", "outcome" => outcome).record(elapsed);
}
