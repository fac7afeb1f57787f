//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Request correlation:
//!     http::trace_context attaches a TraceContext to every request
//!     http::access_log opens a span carrying its ids
//!     → every event emitted while handling the request inherits them
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Trace ids flow through spans, not through function arguments
//! - Metrics are cheap (atomic increments) and off unless enabled

pub mod logging;
pub mod metrics;
