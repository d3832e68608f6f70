//! Monitored server abstraction.
//!
//! # Responsibilities
//! - Hold the static identity of one server (id, name, health check URI)
//! - Own the server's mutable status behind a per-server lock
//! - Serialize state merges so status and error are never observed torn

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ServerConfig;
use crate::health::{Outcome, ServerError, ServerState, ServerStatus, Transition};

/// A single monitored server.
#[derive(Debug)]
pub struct MonitoredServer {
    id: String,
    name: String,
    health_check_uri: String,
    state: Mutex<ServerState>,
}

impl MonitoredServer {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            health_check_uri: config.health_check_uri.clone(),
            state: Mutex::new(ServerState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health_check_uri(&self) -> &str {
        &self.health_check_uri
    }

    /// Copy of the current state.
    pub fn state(&self) -> ServerState {
        self.lock().clone()
    }

    /// Merge a probe outcome into this server's state.
    pub fn apply(&self, outcome: Outcome) -> Transition {
        self.apply_at(outcome, Utc::now())
    }

    pub fn apply_at(&self, outcome: Outcome, now: DateTime<Utc>) -> Transition {
        self.lock().apply(outcome, now)
    }

    pub fn view(&self) -> ServerView {
        let state = self.state();
        ServerView {
            id: self.id.clone(),
            name: self.name.clone(),
            health_check_uri: self.health_check_uri.clone(),
            last_time_up: state.last_time_up(),
            status: state.status(),
            error: state.error().cloned(),
        }
    }

    // A panic while holding the lock cannot leave the state half-written:
    // `ServerState::apply` only assigns fields after computing them.
    fn lock(&self) -> MutexGuard<'_, ServerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Serializable snapshot of a server's fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerView {
    pub id: String,
    pub name: String,
    pub health_check_uri: String,
    /// `null` until the server has been seen up.
    pub last_time_up: Option<DateTime<Utc>>,
    pub status: ServerStatus,
    pub error: Option<ServerError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> MonitoredServer {
        MonitoredServer::new(&ServerConfig::new("1", "example", "https://example.com"))
    }

    #[test]
    fn fresh_server_view() {
        let view = server().view();
        assert_eq!(view.status, ServerStatus::Down);
        assert!(view.error.is_none());
        assert!(view.last_time_up.is_none());

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "1",
                "name": "example",
                "healthCheckUri": "https://example.com",
                "lastTimeUp": null,
                "status": "DOWN",
                "error": null,
            })
        );
    }

    #[test]
    fn apply_mutates_shared_state() {
        let server = server();
        let transition = server.apply(Outcome::Up);
        assert!(transition.changed());
        assert_eq!(server.view().status, ServerStatus::Up);

        server.apply(Outcome::http(503, "maintenance"));
        let view = server.view();
        assert_eq!(view.status, ServerStatus::Down);
        assert_eq!(view.error.unwrap().status_code, 503);
        assert!(view.last_time_up.is_some());
    }

    #[test]
    fn concurrent_applies_never_tear() {
        let server = std::sync::Arc::new(server());
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let server = server.clone();
                std::thread::spawn(move || {
                    for _ in 0..200 {
                        if i % 2 == 0 {
                            server.apply(Outcome::Up);
                        } else {
                            server.apply(Outcome::transport("refused"));
                        }
                        let state = server.state();
                        assert_eq!(state.status() == ServerStatus::Up, state.error().is_none());
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
    }
}
