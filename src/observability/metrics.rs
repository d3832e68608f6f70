//! Metrics collection and exposition.
//!
//! # Metrics
//! - `health_checker_probes_total` (counter): probes by outcome (up/http/transport)
//! - `health_checker_probe_duration_seconds` (histogram): probe latency
//! - `health_checker_server_up` (gauge): 1=UP, 0=DOWN, per server id
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::health::ServerStatus;

/// Start the Prometheus scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_probe(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("health_checker_probes_total", "outcome" => outcome).increment(1);
    metrics::histogram!("health_checker_probe_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

pub fn record_server_status(server_id: &str, status: ServerStatus) {
    let value = match status {
        ServerStatus::Up => 1.0,
        ServerStatus::Down => 0.0,
    };
    metrics::gauge!("health_checker_server_up", "server" => server_id.to_string()).set(value);
}
