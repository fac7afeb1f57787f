//! Web frontend service.
//!
//! # Routes
//! ```text
//! GET  /              public; redirects to /feed when signed in
//! GET  /feed          session; health check, then the feed
//! POST /select_feed   session; the API enforces the admin role
//! GET  /auth/login    sign-in form
//! POST /auth/login    exchange an access token for a session
//! GET  /auth/logout   drop the session
//! ```
//!
//! # Data Flow
//! ```text
//! browser
//!     → session.rs (cookie → Session)
//!     → handlers.rs
//!     → client.rs (GET/POST /api/*, forwarding trace id and bearer token)
//!     → pages.rs (HTML)
//! ```

pub mod client;
pub mod handlers;
pub mod pages;
pub mod session;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue},
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::auth::middleware::SharedAuthenticator;
use crate::auth::StaticTokens;
use crate::config::AppConfig;
use crate::http::server;

pub use client::{ClientError, FeedApiClient};
pub use session::{Session, SessionStore};

/// State injected into web handlers.
#[derive(Clone)]
pub struct WebState {
    pub client: FeedApiClient,
    pub sessions: SessionStore,
    pub authenticator: SharedAuthenticator,
}

/// The web frontend server.
pub struct WebServer {
    router: Router,
    state: WebState,
}

impl WebServer {
    /// Build the server, resolving tokens from `config.auth`.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let authenticator = Arc::new(StaticTokens::from_config(&config.auth.tokens));
        Self::with_authenticator(config, authenticator)
    }

    /// Build the server around an external authenticator.
    pub fn with_authenticator(
        config: &AppConfig,
        authenticator: SharedAuthenticator,
    ) -> Result<Self, ClientError> {
        let client = FeedApiClient::new(
            config.web.api_base_url(),
            Duration::from_secs(config.timeouts.upstream_secs),
        )?;
        let state = WebState {
            client,
            sessions: SessionStore::new(
                config.web.session_cookie.clone(),
                Duration::from_secs(config.web.session_ttl_secs),
            ),
            authenticator,
        };

        let mut router = Self::build_router(state.clone());
        if config.security.enable_headers {
            router = Self::with_security_headers(router);
        }
        let router = server::with_common_layers(router, config);

        Ok(Self { router, state })
    }

    fn build_router(state: WebState) -> Router {
        let protected = Router::new()
            .route("/feed", get(handlers::feed).fallback(handlers::not_found))
            .route(
                "/select_feed",
                post(handlers::select_feed).fallback(handlers::not_found),
            )
            .route_layer(middleware::from_fn_with_state(
                state.clone(),
                handlers::require_session,
            ));

        Router::new()
            .route("/", get(handlers::home))
            .route(
                "/auth/login",
                get(handlers::login_form).post(handlers::login),
            )
            .route("/auth/logout", get(handlers::logout))
            .merge(protected)
            .with_state(state)
    }

    fn with_security_headers(router: Router) -> Router {
        router
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::REFERRER_POLICY,
                HeaderValue::from_static("no-referrer"),
            ))
    }

    /// Router with all middleware applied.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.state.sessions
    }

    /// Serve until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!("web frontend ready");
        server::serve(listener, self.router, shutdown).await
    }
}
