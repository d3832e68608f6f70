//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or built-in defaults
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → MonitorConfig (validated, immutable)
//!     → consumed once at startup to build the registry and server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the server set is fixed for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, MonitorConfig, ObservabilityConfig, ProbeConfig, ServerConfig,
    ServerList,
};
pub use validation::ValidationError;
