//! Per-request access logging.
//!
//! Every request runs inside a `request` span carrying the method, the path
//! and the ids of its [`TraceContext`]; events emitted by handlers inherit
//! those fields. When the handler returns, one `http request completed`
//! record is emitted with the final status and the elapsed time.
//!
//! The middleware sees a finished [`Response`], so it logs its status as is.
//! [`StatusRecorder`] models the status bookkeeping of a writer that can be
//! told a status more than once; it is not wired into the middleware.

use std::time::Instant;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{field, Instrument, Span};

use crate::http::trace_context::TraceContext;
use crate::observability::metrics;

/// Records the status a response was sent with.
///
/// The first `write_header` wins; a body write without an explicit status
/// implies 200.
#[derive(Debug, Default, Clone, Copy)]
pub struct StatusRecorder {
    status: Option<StatusCode>,
}

impl StatusRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `status` unless a status was already recorded.
    ///
    /// Returns whether the call took effect.
    pub fn write_header(&mut self, status: StatusCode) -> bool {
        if self.status.is_some() {
            return false;
        }
        self.status = Some(status);
        true
    }

    /// Note a body write. Implies 200 when no status was recorded yet.
    pub fn write(&mut self) {
        self.write_header(StatusCode::OK);
    }

    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }
}

/// Span under which a request is handled.
pub fn request_span(method: &str, path: &str, trace: &TraceContext) -> Span {
    let span = tracing::info_span!(
        "request",
        method = %method,
        path = %path,
        trace_id = %trace.trace_id(),
        sender_trace_id = field::Empty,
    );
    if let Some(sender) = trace.sender_trace_id() {
        span.record("sender_trace_id", sender);
    }
    span
}

/// Middleware emitting one structured record per request.
///
/// Must be layered inside [`TraceContextLayer`](crate::http::TraceContextLayer)
/// so the context is already attached.
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let trace = request
        .extensions()
        .get::<TraceContext>()
        .cloned()
        .unwrap_or_else(TraceContext::generate);

    let span = request_span(&method, &path, &trace);

    async move {
        let response = next.run(request).await;
        let status = response.status();

        tracing::info!(
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "http request completed"
        );
        metrics::record_request(&method, status.as_u16(), start);

        response
    }
    .instrument(span)
    .await
}
