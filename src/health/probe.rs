//! Probe execution.
//!
//! # Responsibilities
//! - Issue exactly one GET against a health check URI
//! - Classify the response (or the lack of one) into an `Outcome`
//! - Honour the caller's deadline by dropping the in-flight request
//!
//! The executor never touches server state; merging the outcome is the
//! state machine's job.

use std::error::Error as StdError;
use std::time::Instant as StdInstant;

use tokio::time::{self, Instant};
use url::Url;

use crate::config::ProbeConfig;
use crate::health::outcome::Outcome;
use crate::observability::metrics;

/// Issues single-attempt HTTP probes.
#[derive(Debug, Clone)]
pub struct ProbeExecutor {
    client: reqwest::Client,
}

impl ProbeExecutor {
    pub fn new(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Probe with no deadline other than whatever the transport imposes.
    pub async fn probe(&self, uri: &str) -> Outcome {
        let started = StdInstant::now();
        let outcome = self.execute(uri).await;
        metrics::record_probe(outcome.label(), started.elapsed());
        outcome
    }

    /// Probe, giving up at `deadline`.
    ///
    /// Expiry drops the request future, which aborts the connection, and is
    /// reported as a transport failure.
    pub async fn probe_until(&self, uri: &str, deadline: Instant) -> Outcome {
        let started = StdInstant::now();
        let outcome = match time::timeout_at(deadline, self.execute(uri)).await {
            Ok(outcome) => outcome,
            Err(_) => Outcome::transport(format!(
                "probe of {uri} cancelled: request deadline elapsed after {} ms",
                started.elapsed().as_millis()
            )),
        };
        metrics::record_probe(outcome.label(), started.elapsed());
        outcome
    }

    async fn execute(&self, uri: &str) -> Outcome {
        let url = match Url::parse(uri) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(uri = %uri, error = %e, "Malformed health check uri");
                return Outcome::transport(format!("invalid health check uri '{uri}': {e}"));
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(uri = %uri, error = %e, "Probe failed: transport error");
                return Outcome::transport(describe(&e));
            }
        };

        let status = response.status();
        if status.is_success() {
            tracing::debug!(uri = %uri, status = %status, "Probe succeeded");
            return Outcome::Up;
        }

        match response.text().await {
            Ok(body) => {
                tracing::debug!(
                    uri = %uri,
                    status = %status,
                    "Probe failed: non-success status"
                );
                Outcome::http(status.as_u16(), body)
            }
            Err(e) => {
                tracing::debug!(
                    uri = %uri,
                    status = %status,
                    error = %e,
                    "Probe failed: unreadable body"
                );
                Outcome::transport(describe(&e))
            }
        }
    }
}

/// Flatten an error and its sources into one line.
fn describe(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
