//! Query layer.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → facade.rs
//!     → ProbeExecutor (one GET per server, shared deadline)
//!     → Outcome
//!     → MonitoredServer::apply (per-server lock)
//!     → ServerView
//! ```

pub mod facade;

pub use facade::{QueryError, QueryFacade, Resolve};
