//! Request-scoped trace context.
//!
//! # Responsibilities
//! - Generate a fresh trace id (UUID v4) for every inbound request
//! - Capture the caller's trace id from `X-Sender-Trace-Id`, if any
//! - Attach both to the request extensions before any handler runs
//!
//! # Design Decisions
//! - The generated id is always fresh, even when the caller sent one
//! - The context is immutable once attached
//! - Handlers read it through an extractor, never through an untyped lookup

use std::convert::Infallible;
use std::task::{Context, Poll};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Request};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::net::SENDER_TRACE_ID;

/// Correlation identifiers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    trace_id: String,
    sender_trace_id: Option<String>,
}

impl TraceContext {
    /// A context with a new trace id and no sender.
    pub fn generate() -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string(),
            sender_trace_id: None,
        }
    }

    /// A context with a new trace id and the sender id found in `headers`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let sender_trace_id = headers
            .get(SENDER_TRACE_ID)
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .filter(|v| !v.is_empty());

        Self {
            sender_trace_id,
            ..Self::generate()
        }
    }

    /// Id generated for this request.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    /// Id forwarded by the upstream caller.
    pub fn sender_trace_id(&self) -> Option<&str> {
        self.sender_trace_id.as_deref()
    }
}

impl<S> FromRequestParts<S> for TraceContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<TraceContext>()
            .cloned()
            .unwrap_or_else(|| TraceContext::from_headers(&parts.headers)))
    }
}

/// Layer that attaches a [`TraceContext`] to each request.
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceContextLayer;

impl<S> Layer<S> for TraceContextLayer {
    type Service = TraceContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceContextService { inner }
    }
}

/// Service produced by [`TraceContextLayer`].
#[derive(Debug, Clone)]
pub struct TraceContextService<S> {
    inner: S,
}

impl<S, B> Service<Request<B>> for TraceContextService<S>
where
    S: Service<Request<B>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<B>) -> Self::Future {
        let context = TraceContext::from_headers(request.headers());
        request.extensions_mut().insert(context);
        self.inner.call(request)
    }
}
