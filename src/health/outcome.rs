//! Probe outcome classification.
//!
//! # Failure taxonomy
//! - `ProbeFailure::Http`: upstream answered with a non-2xx status code
//! - `ProbeFailure::Transport`: the probe never produced a response
//!   (DNS, refused connection, TLS, deadline, unreadable body, bad URI)
//!
//! Both fold into the same `{statusCode, body}` error record. A transport
//! failure always reports status code 500, so a 500 in the record does not
//! mean the upstream answered; `ServerError::kind` tells the two apart.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status code reported for failures that produced no HTTP response.
pub const TRANSPORT_FAILURE_STATUS: u16 = 500;

/// Classified result of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Up,
    Down(ProbeFailure),
}

impl Outcome {
    pub fn http(status_code: u16, body: impl Into<String>) -> Self {
        Outcome::Down(ProbeFailure::Http {
            status_code,
            body: body.into(),
        })
    }

    pub fn transport(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            "probe failed without a description".to_string()
        } else {
            message
        };
        Outcome::Down(ProbeFailure::Transport { message })
    }

    pub fn is_up(&self) -> bool {
        matches!(self, Outcome::Up)
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Up => "up",
            Outcome::Down(failure) => failure.kind().as_str(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProbeFailure {
    #[error("upstream responded with HTTP {status_code}")]
    Http { status_code: u16, body: String },

    #[error("{message}")]
    Transport { message: String },
}

impl ProbeFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            ProbeFailure::Http { .. } => FailureKind::Http,
            ProbeFailure::Transport { .. } => FailureKind::Transport,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ProbeFailure::Http { status_code, .. } => *status_code,
            ProbeFailure::Transport { .. } => TRANSPORT_FAILURE_STATUS,
        }
    }

    pub fn body(&self) -> &str {
        match self {
            ProbeFailure::Http { body, .. } => body,
            ProbeFailure::Transport { message } => message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Http,
    Transport,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Http => "http",
            FailureKind::Transport => "transport",
        }
    }
}

/// Error detail stored on a DOWN server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerError {
    /// The HTTP status code of the error.
    pub status_code: u16,
    /// The response body of the error.
    pub body: String,
    pub kind: FailureKind,
}

impl From<ProbeFailure> for ServerError {
    fn from(failure: ProbeFailure) -> Self {
        let kind = failure.kind();
        let status_code = failure.status_code();
        let body = match failure {
            ProbeFailure::Http { body, .. } => body,
            ProbeFailure::Transport { message } => message,
        };
        Self {
            status_code,
            body,
            kind,
        }
    }
}
