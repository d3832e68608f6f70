//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the monitor.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the health checker.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MonitorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Monitored servers, in registration order.
    pub servers: ServerList,

    /// Probe settings.
    pub probe: ProbeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// A single monitored server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Unique server identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// URI probed with a GET request.
    pub health_check_uri: String,
}

impl ServerConfig {
    pub fn new(id: &str, name: &str, health_check_uri: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            health_check_uri: health_check_uri.to_string(),
        }
    }
}

/// Ordered list of servers. Defaults to the reference set.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ServerList(pub Vec<ServerConfig>);

impl Default for ServerList {
    fn default() -> Self {
        Self(vec![
            ServerConfig::new("1", "stackworx.io", "https://www.stackworx.io"),
            ServerConfig::new("2", "prima.run", "https://prima.run"),
            ServerConfig::new("3", "google", "https://www.google.com"),
        ])
    }
}

impl ServerList {
    pub fn iter(&self) -> std::slice::Iter<'_, ServerConfig> {
        self.0.iter()
    }

    pub fn push(&mut self, server: ServerConfig) {
        self.0.push(server);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<ServerConfig>> for ServerList {
    fn from(servers: Vec<ServerConfig>) -> Self {
        Self(servers)
    }
}

/// Probe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Budget for all probes issued on behalf of one incoming request.
    pub request_deadline_secs: u64,

    /// Maximum probes in flight for one request.
    pub max_concurrency: usize,

    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Route probes through proxies named in the environment (`HTTPS_PROXY` etc.).
    pub system_proxy: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_deadline_secs: 5,
            max_concurrency: 16,
            user_agent: concat!("health-checker/", env!("CARGO_PKG_VERSION")).to_string(),
            system_proxy: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_reference_servers() {
        let config = MonitorConfig::default();
        let ids: Vec<_> = config.servers.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(config.servers.0[2].health_check_uri, "https://www.google.com");
        assert_eq!(config.probe.request_deadline_secs, 5);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [probe]
            max_concurrency = 4

            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.probe.max_concurrency, 4);
        assert_eq!(config.probe.request_deadline_secs, 5);
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.servers.len(), 3);
    }

    #[test]
    fn explicit_servers_replace_defaults() {
        let config: MonitorConfig = toml::from_str(
            r#"
            [[servers]]
            id = "a"
            name = "local"
            health_check_uri = "http://127.0.0.1:3000/health"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.servers.0,
            vec![ServerConfig::new("a", "local", "http://127.0.0.1:3000/health")]
        );
    }
}
