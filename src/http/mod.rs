//! HTTP plumbing shared by the API and the web frontend.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum serve, graceful shutdown)
//!     → trace_context.rs (generate trace id, capture sender id)
//!     → access_log.rs (request span, completion record, metrics)
//!     → body limit, timeout
//!     → service router (api:: or web::)
//!     → response.rs (errors → status codes)
//!     → Send to client
//! ```

pub mod access_log;
pub mod response;
pub mod server;
pub mod trace_context;

pub use access_log::StatusRecorder;
pub use response::ApiError;
pub use trace_context::{TraceContext, TraceContextLayer};
