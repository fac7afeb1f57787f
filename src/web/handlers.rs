//! Web frontend handlers.

use axum::{
    extract::{rejection::FormRejection, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::http::response::{found, see_other};
use crate::http::{ApiError, TraceContext};
use crate::net::StatusError;
use crate::web::client::ClientError;
use crate::web::pages::{self, FeedPage};
use crate::web::session::Session;
use crate::web::WebState;

#[derive(Debug, Deserialize)]
pub struct SelectForm {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub token: String,
}

/// Redirect to the sign-in page unless the request carries a live session.
pub async fn require_session(
    State(state): State<WebState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.sessions.from_headers(request.headers()) {
        Some(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        None => {
            tracing::debug!("no session, redirecting to sign-in");
            found("/auth/login")
        }
    }
}

/// `GET /`: home page, or straight to the feed when signed in.
pub async fn home(State(state): State<WebState>, headers: HeaderMap) -> Response {
    if state.sessions.from_headers(&headers).is_some() {
        return found("/feed");
    }
    Html(pages::home()).into_response()
}

/// `GET /feed`: render the selected feed.
pub async fn feed(
    State(state): State<WebState>,
    Extension(session): Extension<Session>,
    trace: TraceContext,
) -> Result<Response, ApiError> {
    let mut page = FeedPage::new(session.principal.display_name());

    if let Err(e) = state.client.check_health(&trace).await {
        tracing::error!(error = %e, "feed api is down or unresponsive");
        page.health = false;
        return Ok(Html(pages::feed(&page)).into_response());
    }

    match state.client.get_feed(&trace, &session.access_token).await {
        Ok(response) => page.feed = Some(response),
        Err(e) if e.is_unauthenticated() => {
            tracing::info!(user_id = %session.principal.user_id, "access token rejected, signing out");
            return Ok(found("/auth/logout"));
        }
        Err(e) => return Err(ApiError::internal(format!("feed api call failed: {e}"))),
    }

    Ok(Html(pages::feed(&page)).into_response())
}

/// `POST /select_feed`: change the feed the API serves.
pub async fn select_feed(
    State(state): State<WebState>,
    Extension(session): Extension<Session>,
    trace: TraceContext,
    form: Result<Form<SelectForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) =
        form.map_err(|_| ApiError::BadRequest("failed to parse form data".to_string()))?;

    let name = form.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name can't be empty".to_string()));
    }

    state
        .client
        .select_feed(&trace, name, &session.access_token)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "select feed api call failed");
            match e {
                ClientError::Status(StatusError::NoAccess) => ApiError::Forbidden,
                ClientError::Status(StatusError::Unauthenticated) => ApiError::Unauthenticated,
                other => ApiError::internal(other),
            }
        })?;

    Ok(see_other("/feed"))
}

/// `GET /auth/login`
pub async fn login_form() -> Html<String> {
    Html(pages::login(None))
}

/// `POST /auth/login`: exchange an access token for a session.
pub async fn login(
    State(state): State<WebState>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(form) =
        form.map_err(|_| ApiError::BadRequest("failed to parse form data".to_string()))?;

    let token = form.token.trim();
    let Some(principal) = state.authenticator.authenticate(token) else {
        tracing::warn!("sign-in with unknown access token");
        return Ok((
            StatusCode::UNAUTHORIZED,
            Html(pages::login(Some("Unknown or expired access token."))),
        )
            .into_response());
    };

    tracing::info!(user_id = %principal.user_id, "user signed in");
    let id = state.sessions.create(Session {
        access_token: token.to_string(),
        principal,
    });

    Ok((
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, "/feed".to_string()),
            (header::SET_COOKIE, state.sessions.cookie(&id)),
        ],
    )
        .into_response())
}

/// `GET /auth/logout`: drop the session and go home.
pub async fn logout(State(state): State<WebState>, headers: HeaderMap) -> Response {
    if let Some(id) = state.sessions.session_id(&headers) {
        if let Some(session) = state.sessions.remove(id) {
            tracing::info!(user_id = %session.principal.user_id, "user signed out");
        }
    }

    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, state.sessions.expired_cookie()),
        ],
    )
        .into_response()
}

/// Any verb a route does not serve.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
