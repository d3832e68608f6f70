//! Server registry.
//!
//! # Responsibilities
//! - Build the fixed set of monitored servers from configuration
//! - Preserve registration order
//! - Look servers up by id
//!
//! # Design Decisions
//! - Built once at startup and shared via `Arc`; no add/remove
//! - Entries are `Arc<MonitoredServer>` so probe results can be matched
//!   back to their server by identity
//! - The list filter is accepted but does not narrow the result

pub mod server;

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::health::ServerStatus;

pub use server::{MonitoredServer, ServerView};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("server id '{0}' is registered more than once")]
    DuplicateId(String),
}

/// Filter accepted by `list`.
///
/// Neither field narrows the result; both are carried so callers can pass
/// them through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServerFilter {
    pub id: Option<String>,
    pub status: Option<ServerStatus>,
}

impl ServerFilter {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.status.is_none()
    }
}

/// Owns every monitored server for the lifetime of the process.
#[derive(Debug, Default)]
pub struct ServerRegistry {
    servers: Vec<Arc<MonitoredServer>>,
    index: HashMap<String, usize>,
}

impl ServerRegistry {
    pub fn new<'a, I>(configs: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = &'a ServerConfig>,
    {
        let mut registry = Self::default();
        for config in configs {
            if registry.index.contains_key(&config.id) {
                return Err(RegistryError::DuplicateId(config.id.clone()));
            }
            registry.index.insert(config.id.clone(), registry.servers.len());
            registry.servers.push(Arc::new(MonitoredServer::new(config)));
        }
        Ok(registry)
    }

    /// All servers in registration order.
    pub fn list(&self, filter: &ServerFilter) -> Vec<Arc<MonitoredServer>> {
        if !filter.is_empty() {
            tracing::debug!(
                id = ?filter.id,
                status = ?filter.status,
                "Server filter supplied; returning the full set"
            );
        }
        self.servers.clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<MonitoredServer>> {
        self.index.get(id).map(|&i| self.servers[i].clone())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerList;

    fn registry() -> ServerRegistry {
        ServerRegistry::new(ServerList::default().iter()).unwrap()
    }

    fn ids(servers: &[Arc<MonitoredServer>]) -> Vec<&str> {
        servers.iter().map(|s| s.id()).collect()
    }

    #[test]
    fn lists_in_registration_order() {
        let registry = registry();
        assert_eq!(ids(&registry.list(&ServerFilter::default())), ["1", "2", "3"]);
    }

    #[test]
    fn filter_is_inert() {
        let registry = registry();
        let all = registry.list(&ServerFilter::default());

        let by_id = registry.list(&ServerFilter {
            id: Some("nonexistent-id".into()),
            status: None,
        });
        let by_status = registry.list(&ServerFilter {
            id: None,
            status: Some(ServerStatus::Up),
        });

        assert_eq!(ids(&by_id), ids(&all));
        assert_eq!(ids(&by_status), ids(&all));
    }

    #[test]
    fn list_shares_entries() {
        let registry = registry();
        let first = registry.list(&ServerFilter::default());
        let second = registry.list(&ServerFilter::default());
        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert!(Arc::ptr_eq(&first[1], &registry.get("2").unwrap()));
    }

    #[test]
    fn get_unknown_id() {
        assert!(registry().get("42").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let configs = [
            ServerConfig::new("a", "one", "http://a"),
            ServerConfig::new("a", "two", "http://b"),
        ];
        assert_eq!(
            ServerRegistry::new(&configs).unwrap_err(),
            RegistryError::DuplicateId("a".into())
        );
    }
}
