//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Compile, reload and watcher events:
//!     → logging.rs (structured log events)
//!
//! Hot-path lookups and reloads:
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - The routing core never logs no-match outcomes; callers decide
//! - Metrics are cheap (atomic increments behind the facade)

pub mod logging;
pub mod metrics;
