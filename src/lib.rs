//! On-demand server health checker library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod query;
pub mod registry;

pub use config::schema::MonitorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use query::QueryFacade;
