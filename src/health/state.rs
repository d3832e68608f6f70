//! Server status state machine.
//!
//! # States
//! - UP: last probe succeeded, no error recorded
//! - DOWN: last probe failed (or no probe yet), error holds the detail
//!
//! # State Transitions
//! ```text
//! any → UP:   Outcome::Up        error cleared, last_time_up = now
//! any → DOWN: Outcome::Down(f)   error = f, last_time_up untouched
//! ```
//!
//! # Design Decisions
//! - No thresholds and no timers: every outcome is applied as-is
//! - `last_time_up` never moves backwards, even if the wall clock does
//! - The transition is a pure function of (state, outcome, now)

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::health::outcome::{Outcome, ServerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServerStatus {
    Up,
    #[default]
    Down,
}

impl ServerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServerStatus::Up => "UP",
            ServerStatus::Down => "DOWN",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown server status '{0}'")]
pub struct UnknownStatus(String);

impl FromStr for ServerStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("up") {
            Ok(ServerStatus::Up)
        } else if s.eq_ignore_ascii_case("down") {
            Ok(ServerStatus::Down)
        } else {
            Err(UnknownStatus(s.to_string()))
        }
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable status of one monitored server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerState {
    status: ServerStatus,
    /// `None` until the first successful probe.
    last_time_up: Option<DateTime<Utc>>,
    error: Option<ServerError>,
}

/// Status change produced by a single `apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: ServerStatus,
    pub to: ServerStatus,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

impl ServerState {
    pub fn status(&self) -> ServerStatus {
        self.status
    }

    pub fn last_time_up(&self) -> Option<DateTime<Utc>> {
        self.last_time_up
    }

    pub fn error(&self) -> Option<&ServerError> {
        self.error.as_ref()
    }

    pub fn apply(&mut self, outcome: Outcome, now: DateTime<Utc>) -> Transition {
        let from = self.status;
        match outcome {
            Outcome::Up => {
                self.status = ServerStatus::Up;
                self.error = None;
                self.last_time_up = Some(match self.last_time_up {
                    Some(previous) if previous > now => previous,
                    _ => now,
                });
            }
            Outcome::Down(failure) => {
                self.status = ServerStatus::Down;
                self.error = Some(failure.into());
            }
        }
        Transition {
            from,
            to: self.status,
        }
    }
}
