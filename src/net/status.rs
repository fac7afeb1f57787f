//! Status code classification.

use axum::http::StatusCode;
use thiserror::Error;

/// Header carrying the caller's trace id across service boundaries.
pub const SENDER_TRACE_ID: &str = "x-sender-trace-id";

/// Closed taxonomy of failures derived from an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatusError {
    /// 401 from the callee.
    #[error("not authenticated")]
    Unauthenticated,

    /// 403 from the callee.
    #[error("not authorized")]
    NoAccess,

    /// 404 from the callee.
    #[error("resource not found")]
    NotFound,

    /// Any other non-200 status.
    #[error("request failed")]
    Generic,
}

/// Map a response status to `Ok(())` or exactly one [`StatusError`].
///
/// Only 200 counts as success; other 2xx codes are classified as [`StatusError::Generic`].
pub fn classify(status: StatusCode) -> Result<(), StatusError> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::UNAUTHORIZED => Err(StatusError::Unauthenticated),
        StatusCode::FORBIDDEN => Err(StatusError::NoAccess),
        StatusCode::NOT_FOUND => Err(StatusError::NotFound),
        _ => Err(StatusError::Generic),
    }
}
