//! Typed client for the backend feed API.
//!
//! Every call forwards the current request's trace id in
//! `X-Sender-Trace-Id`, so the API logs it as its sender trace id.

use std::time::Duration;

use axum::http::Method;
use thiserror::Error;

use crate::feed::{FeedResponse, SelectedFeed};
use crate::http::TraceContext;
use crate::net::{classify, StatusError, SENDER_TRACE_ID};

/// Errors from [`FeedApiClient`] calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failure or timeout; the API never answered.
    #[error("failed to query feed api: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-200 status.
    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("failed to decode feed api response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Whether the API rejected the access token.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ClientError::Status(StatusError::Unauthenticated))
    }

    /// Status classification, if the API answered at all.
    pub fn status(&self) -> Option<StatusError> {
        match self {
            ClientError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

/// Client for `/api/*`. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FeedApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl FeedApiClient {
    /// `base_url` ends with `/api/` (see
    /// [`WebConfig::api_base_url`](crate::config::WebConfig::api_base_url)).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        trace: &TraceContext,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(SENDER_TRACE_ID, trace.trace_id());
        if let Some(token) = access_token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(builder: reqwest::RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let response = builder.send().await.map_err(ClientError::Transport)?;
        classify(response.status())?;
        Ok(response)
    }

    /// `Ok` iff `/api/healthz` answers 200.
    pub async fn check_health(&self, trace: &TraceContext) -> Result<(), ClientError> {
        Self::send(self.request(Method::GET, "healthz", trace, None)).await?;
        Ok(())
    }

    /// Ask the API to serve `name`'s feed from now on.
    pub async fn select_feed(
        &self,
        trace: &TraceContext,
        name: &str,
        access_token: &str,
    ) -> Result<(), ClientError> {
        let body = SelectedFeed {
            name: name.to_string(),
        };
        let builder = self
            .request(Method::POST, "select_feed", trace, Some(access_token))
            .json(&body);
        Self::send(builder).await?;
        Ok(())
    }

    /// Fetch the currently selected feed.
    pub async fn get_feed(
        &self,
        trace: &TraceContext,
        access_token: &str,
    ) -> Result<FeedResponse, ClientError> {
        let response = Self::send(self.request(Method::GET, "feed", trace, Some(access_token))).await?;
        response.json().await.map_err(ClientError::Decode)
    }
}
