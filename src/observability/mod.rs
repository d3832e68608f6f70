//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Probes, state merges and HTTP handlers produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID attached to every HTTP span
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
