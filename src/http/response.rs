//! Response helpers shared by both services.
//!
//! # Responsibilities
//! - Map handler errors to appropriate HTTP status codes
//! - Keep internal error detail out of response bodies
//! - Build redirects
//!
//! # Design Decisions
//! - Internal errors are logged where they are turned into a response,
//!   inside the request span, so the log line carries the trace ids
//! - Client errors carry a short, caller-safe message

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::net::StatusError;

/// Error type returned by route handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    BadRequest(String),

    /// Detail is logged, never sent.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn internal(err: impl std::fmt::Display) -> Self {
        Self::Internal(err.to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StatusError> for ApiError {
    fn from(err: StatusError) -> Self {
        match err {
            StatusError::Unauthenticated => ApiError::Unauthenticated,
            StatusError::NoAccess => ApiError::Forbidden,
            StatusError::NotFound => ApiError::NotFound,
            StatusError::Generic => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (status, "internal server error").into_response()
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(reason = %msg, "rejected request");
                (status, msg).into_response()
            }
            other => (status, other.to_string()).into_response(),
        }
    }
}

/// 302 Found to `location`.
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// 303 See Other to `location`, used after a successful form POST.
pub fn see_other(location: &'static str) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}
