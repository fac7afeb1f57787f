//! Outbound HTTP plumbing shared by both services.
//!
//! # Data Flow
//! ```text
//! reqwest response
//!     → status.rs (classify status code)
//!     → Ok(())            body is consumed by the caller
//!     → Err(StatusError)  surfaced to the handler, mapped to its own status
//! ```
//!
//! # Design Decisions
//! - Classification is a pure function of the status code
//! - No retries anywhere: one failed call is one failed response

pub mod status;

pub use status::{classify, StatusError, SENDER_TRACE_ID};
