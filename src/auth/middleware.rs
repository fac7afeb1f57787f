//! Bearer-token authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::Authenticator;
use crate::http::ApiError;

/// Shared authenticator handed to the middleware.
pub type SharedAuthenticator = Arc<dyn Authenticator>;

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Reject requests without a valid bearer token; attach the
/// [`Principal`](crate::auth::Principal) to the others.
pub async fn require_auth(
    State(authenticator): State<SharedAuthenticator>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = bearer_token(request.headers())
        .and_then(|token| authenticator.authenticate(token))
        .ok_or_else(|| {
            tracing::warn!("missing or invalid access token");
            ApiError::Unauthenticated
        })?;

    tracing::debug!(user_id = %principal.user_id, "request authenticated");
    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
