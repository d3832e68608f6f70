//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject duplicate or empty server ids
//! - Validate value ranges (deadline > 0, concurrency > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: MonitorConfig → Result<(), Vec<ValidationError>>
//! - Health check URIs are not checked here; a malformed URI is reported
//!   as a failed probe at runtime

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::MonitorConfig;

/// Upper bound for `probe.request_deadline_secs`.
pub const MAX_REQUEST_DEADLINE_SECS: u64 = 3600;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("server at position {index} has an empty id")]
    EmptyServerId { index: usize },

    #[error("server '{id}' has an empty name")]
    EmptyServerName { id: String },

    #[error("server id '{id}' is declared more than once")]
    DuplicateServerId { id: String },

    #[error("probe.request_deadline_secs must be greater than zero")]
    ZeroDeadline,

    #[error("probe.request_deadline_secs must not exceed {max} (got {secs})")]
    DeadlineTooLarge { secs: u64, max: u64 },

    #[error("probe.max_concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("{field} '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },
}

pub fn validate_config(config: &MonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for (index, server) in config.servers.iter().enumerate() {
        if server.id.trim().is_empty() {
            errors.push(ValidationError::EmptyServerId { index });
        } else if !seen.insert(server.id.as_str()) {
            errors.push(ValidationError::DuplicateServerId { id: server.id.clone() });
        }
        if server.name.trim().is_empty() {
            errors.push(ValidationError::EmptyServerName { id: server.id.clone() });
        }
    }

    match config.probe.request_deadline_secs {
        0 => errors.push(ValidationError::ZeroDeadline),
        secs if secs > MAX_REQUEST_DEADLINE_SECS => {
            errors.push(ValidationError::DeadlineTooLarge {
                secs,
                max: MAX_REQUEST_DEADLINE_SECS,
            })
        }
        _ => {}
    }
    if config.probe.max_concurrency == 0 {
        errors.push(ValidationError::ZeroConcurrency);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }
    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
