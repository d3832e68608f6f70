//! Query facade over the registry, probe executor and state machine.
//!
//! # Responsibilities
//! - Answer `hello` and server listing queries
//! - Run one probe per server per live query, bounded in concurrency
//! - Share one deadline across every probe issued for a request
//! - Merge outcomes into server state as a separate, logged step

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{self, StreamExt};
use thiserror::Error;
use tokio::time::Instant;

use crate::config::ProbeConfig;
use crate::health::{Outcome, ProbeExecutor};
use crate::observability::metrics;
use crate::registry::{MonitoredServer, ServerFilter, ServerRegistry, ServerView};

/// Stand-in deadline when the configured budget overflows `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("no server with id '{0}'")]
    UnknownServer(String),
}

/// How `list_servers` resolves each server's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolve {
    /// Probe every server and merge the outcome before reading.
    #[default]
    Live,
    /// Read stored state only.
    Stored,
}

pub struct QueryFacade {
    registry: Arc<ServerRegistry>,
    executor: ProbeExecutor,
    request_deadline: Duration,
    max_concurrency: usize,
}

impl QueryFacade {
    pub fn new(
        registry: Arc<ServerRegistry>,
        executor: ProbeExecutor,
        config: &ProbeConfig,
    ) -> Self {
        Self {
            registry,
            executor,
            request_deadline: Duration::from_secs(config.request_deadline_secs),
            max_concurrency: config.max_concurrency.max(1),
        }
    }

    /// Override the per-request probe budget.
    pub fn with_request_deadline(mut self, deadline: Duration) -> Self {
        self.request_deadline = deadline;
        self
    }

    pub fn registry(&self) -> &Arc<ServerRegistry> {
        &self.registry
    }

    pub fn hello(&self) -> &'static str {
        "world"
    }

    pub async fn list_servers(&self, filter: &ServerFilter, resolve: Resolve) -> Vec<ServerView> {
        let servers = self.registry.list(filter);
        if resolve == Resolve::Stored {
            return servers.iter().map(|s| s.view()).collect();
        }

        let deadline = self.deadline();
        let probes = stream::iter(servers.into_iter().enumerate())
            .map(|(position, server)| async move {
                let outcome = self
                    .executor
                    .probe_until(server.health_check_uri(), deadline)
                    .await;
                (position, server, outcome)
            })
            .buffer_unordered(self.max_concurrency);
        let mut probed: Vec<(usize, Arc<MonitoredServer>, Outcome)> = probes.collect().await;

        // buffer_unordered yields in completion order
        probed.sort_by_key(|(position, _, _)| *position);
        probed
            .into_iter()
            .map(|(_, server, outcome)| merge_into(&server, outcome))
            .collect()
    }

    /// Probe one server without touching its state.
    pub async fn probe(&self, id: &str) -> Result<Outcome, QueryError> {
        let server = self.lookup(id)?;
        Ok(self
            .executor
            .probe_until(server.health_check_uri(), self.deadline())
            .await)
    }

    /// Merge an outcome into a server's state and return the new view.
    pub fn merge(&self, id: &str, outcome: Outcome) -> Result<ServerView, QueryError> {
        let server = self.lookup(id)?;
        Ok(merge_into(&server, outcome))
    }

    /// Probe one server and merge the outcome.
    pub async fn refresh(&self, id: &str) -> Result<ServerView, QueryError> {
        let outcome = self.probe(id).await?;
        self.merge(id, outcome)
    }

    /// Stored view of one server.
    pub fn server(&self, id: &str) -> Result<ServerView, QueryError> {
        Ok(self.lookup(id)?.view())
    }

    fn lookup(&self, id: &str) -> Result<Arc<MonitoredServer>, QueryError> {
        self.registry
            .get(id)
            .ok_or_else(|| QueryError::UnknownServer(id.to_string()))
    }

    fn deadline(&self) -> Instant {
        let now = Instant::now();
        now.checked_add(self.request_deadline).unwrap_or_else(|| now + FAR_FUTURE)
    }
}

fn merge_into(server: &MonitoredServer, outcome: Outcome) -> ServerView {
    let label = outcome.label();
    let transition = server.apply(outcome);
    metrics::record_server_status(server.id(), transition.to);

    if transition.changed() {
        tracing::info!(
            server = %server.id(),
            from = %transition.from,
            to = %transition.to,
            outcome = label,
            "Server status changed"
        );
    } else {
        tracing::debug!(
            server = %server.id(),
            status = %transition.to,
            outcome = label,
            "Server status unchanged"
        );
    }
    server.view()
}
