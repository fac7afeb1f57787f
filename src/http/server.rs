//! HTTP server setup shared by the API and the web frontend.
//!
//! # Responsibilities
//! - Wire up the common middleware stack (trace context, access log,
//!   body limit, request timeout)
//! - Bind a router to a listener
//! - Drain in-flight requests on shutdown

use std::time::Duration;

use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer};

use crate::config::AppConfig;
use crate::http::access_log::access_log;
use crate::http::trace_context::TraceContextLayer;

/// Wrap `router` in the middleware every service runs behind.
///
/// Outermost first: trace context, access log, body limit, timeout. The
/// access log therefore also records requests rejected by the inner layers.
#[allow(deprecated)]
pub fn with_common_layers(router: Router, config: &AppConfig) -> Router {
    router
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
        .layer(middleware::from_fn(access_log))
        .layer(TraceContextLayer)
}

/// Serve `router` on `listener` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "HTTP server starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!(address = %addr, "HTTP server stopped");
    Ok(())
}
