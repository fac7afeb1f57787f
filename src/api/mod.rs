//! Backend API service.
//!
//! # Routes
//! ```text
//! GET  /api/healthz       public
//! POST /api/select_feed   bearer token, admin role
//! GET  /api/feed          bearer token, any role
//! ```
//!
//! Unsupported verbs on a known route answer 404, after authentication.

pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use crate::auth::middleware::{require_auth, SharedAuthenticator};
use crate::auth::StaticTokens;
use crate::config::AppConfig;
use crate::feed::{FeedError, FeedProvider, Selection};
use crate::http::server;

/// State injected into API handlers.
#[derive(Clone)]
pub struct ApiState {
    pub selection: Arc<Selection>,
    pub provider: FeedProvider,
}

/// The backend API server.
pub struct ApiServer {
    router: Router,
    state: ApiState,
}

impl ApiServer {
    /// Build the server, resolving tokens from `config.auth`.
    pub fn new(config: &AppConfig) -> Result<Self, FeedError> {
        let authenticator = Arc::new(StaticTokens::from_config(&config.auth.tokens));
        Self::with_authenticator(config, authenticator)
    }

    /// Build the server around an external authenticator.
    pub fn with_authenticator(
        config: &AppConfig,
        authenticator: SharedAuthenticator,
    ) -> Result<Self, FeedError> {
        let provider = FeedProvider::new(
            &config.provider.base_url,
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;
        let state = ApiState {
            selection: Arc::new(Selection::new(config.api.default_username.clone())),
            provider,
        };

        let router = server::with_common_layers(
            Self::build_router(state.clone(), authenticator),
            config,
        );
        Ok(Self { router, state })
    }

    fn build_router(state: ApiState, authenticator: SharedAuthenticator) -> Router {
        let protected = Router::new()
            .route(
                "/api/select_feed",
                post(handlers::select_feed).fallback(handlers::not_found),
            )
            .route(
                "/api/feed",
                get(handlers::feed).fallback(handlers::not_found),
            )
            .route_layer(middleware::from_fn_with_state(authenticator, require_auth));

        Router::new()
            .route("/api/healthz", get(handlers::healthz))
            .merge(protected)
            .fallback(handlers::not_found)
            .with_state(state)
    }

    /// Router with all middleware applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Handle on the selected-username cell.
    pub fn selection(&self) -> Arc<Selection> {
        self.state.selection.clone()
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(
            feed_username = %self.state.selection.get(),
            "feed API ready"
        );
        server::serve(listener, self.router, shutdown).await
    }
}
