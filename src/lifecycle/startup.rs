//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order:
//!   registry → probe executor → facade → HTTP server
//! - Start the metrics exporter when enabled
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The registry is built here and handed down; nothing is global

use std::sync::Arc;

use thiserror::Error;

use crate::config::MonitorConfig;
use crate::health::ProbeExecutor;
use crate::http::HttpServer;
use crate::observability::metrics;
use crate::query::QueryFacade;
use crate::registry::{RegistryError, ServerRegistry};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to build server registry: {0}")]
    Registry(#[from] RegistryError),

    #[error("failed to build probe client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Build the facade from a validated configuration.
pub fn build_facade(config: &MonitorConfig) -> Result<Arc<QueryFacade>, StartupError> {
    let registry = Arc::new(ServerRegistry::new(config.servers.iter())?);
    let executor = ProbeExecutor::new(&config.probe)?;

    tracing::info!(
        servers = registry.len(),
        request_deadline_secs = config.probe.request_deadline_secs,
        max_concurrency = config.probe.max_concurrency,
        "Server registry loaded"
    );

    Ok(Arc::new(QueryFacade::new(registry, executor, &config.probe)))
}

/// Build every subsystem and return a server ready to run.
///
/// Must be called from within a Tokio runtime when metrics are enabled.
pub fn build(config: MonitorConfig) -> Result<HttpServer, StartupError> {
    if config.observability.metrics_enabled {
        let raw = &config.observability.metrics_address;
        let addr = raw.parse().map_err(|_| StartupError::MetricsAddress(raw.clone()))?;
        metrics::init_metrics(addr)?;
    }

    let facade = build_facade(&config)?;
    Ok(HttpServer::new(facade))
}
