//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! On-demand probe (probe.rs):
//!     Query asks for live status
//!     → GET health_check_uri once
//!     → Classify into Outcome (outcome.rs)
//!
//! State machine (state.rs):
//!     Outcome → UP / DOWN
//!     → error detail set or cleared
//!     → last_time_up stamped on UP
//! ```
//!
//! # Design Decisions
//! - No background polling: probes run only when a query needs them
//! - Single attempt per probe, no retries, no thresholds
//! - Failures are data (Outcome::Down), never errors returned to callers

pub mod outcome;
pub mod probe;
pub mod state;

pub use outcome::{FailureKind, Outcome, ProbeFailure, ServerError, TRANSPORT_FAILURE_STATUS};
pub use probe::ProbeExecutor;
pub use state::{ServerState, ServerStatus, Transition, UnknownStatus};
