//! Backend API handlers.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::api::ApiState;
use crate::auth::{Principal, ADMIN_ROLE};
use crate::feed::{FeedResponse, SelectedFeed};
use crate::http::ApiError;

/// `GET /api/healthz`: always OK.
pub async fn healthz() -> Json<&'static str> {
    Json("OK")
}

/// `POST /api/select_feed`: admin only.
pub async fn select_feed(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
    body: Result<Json<SelectedFeed>, JsonRejection>,
) -> Result<Json<&'static str>, ApiError> {
    if !principal.is_granted_role(ADMIN_ROLE) {
        tracing::warn!(
            user_id = %principal.user_id,
            username = %principal.username,
            "user doesn't have access to the resource"
        );
        return Err(ApiError::Forbidden);
    }

    let Json(selected) = body.map_err(|rejection| {
        ApiError::BadRequest(format!("failed to deserialize request body: {}", rejection.body_text()))
    })?;

    let name = selected.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name can't be empty".to_string()));
    }

    state.selection.set(name);
    tracing::info!(
        user_id = %principal.user_id,
        feed_username = %name,
        "selected feed updated"
    );
    Ok(Json("OK"))
}

/// `GET /api/feed`: feed of the selected username.
pub async fn feed(
    State(state): State<ApiState>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<FeedResponse>, ApiError> {
    let username = state.selection.get();
    tracing::info!(
        user_id = %principal.user_id,
        username = %principal.username,
        feed_username = %username,
        "retrieving user feed"
    );

    let feed = state.provider.fetch(&username).await.map_err(ApiError::internal)?;

    Ok(Json(FeedResponse {
        write_access: principal.is_granted_role(ADMIN_ROLE),
        feed: Some(feed),
    }))
}

/// Any verb a route does not serve.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}
