//! Client for the remote listens feed.
//!
//! # Responsibilities
//! - Build the syndication URL for a username
//! - Call the provider with a bounded timeout
//! - Turn a 404 into an empty feed, classify every other failure
//! - Parse and normalize the Atom payload
//!
//! # Design Decisions
//! - No retries: one failed call is one failed response
//! - The time window is pinned to the provider's maximum

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

use crate::feed::atom;
use crate::feed::types::Feed;
use crate::net::{classify, StatusError};
use crate::observability::metrics;

/// Largest time range, in minutes, the provider accepts.
pub const MAX_MINUTES: u32 = 5000;

/// Errors from [`FeedProvider::fetch`].
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("feed provider call failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("feed provider call failed: {0}")]
    Status(#[from] StatusError),

    #[error("failed to decode feed: {0}")]
    Decode(#[from] quick_xml::DeError),

    #[error("invalid feed provider URL: {0}")]
    Url(String),
}

/// Handle on the feed provider. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FeedProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl FeedProvider {
    /// Create a provider client for `base_url` (scheme and host, e.g.
    /// `https://listenbrainz.org`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let base_url = Url::parse(base_url).map_err(|e| FeedError::Url(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(FeedError::Url(base_url.to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FeedError::Transport)?;

        Ok(Self { client, base_url })
    }

    /// Syndication URL of `username`'s listens.
    pub fn feed_url(&self, username: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["syndication-feed", "user", username, "listens"]);
        }
        url.query_pairs_mut()
            .clear()
            .append_pair("minutes", &MAX_MINUTES.to_string());
        url
    }

    /// Fetch and normalize `username`'s feed.
    ///
    /// A provider 404 yields an empty feed rather than an error.
    pub async fn fetch(&self, username: &str) -> Result<Feed, FeedError> {
        let url = self.feed_url(username);
        tracing::debug!(url = %url, "querying feed provider");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                metrics::record_provider_call("transport_error");
                return Err(FeedError::Transport(e));
            }
        };

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            metrics::record_provider_call("not_found");
            tracing::info!(feed_username = %username, "no feed for user, serving empty feed");
            return Ok(Feed::empty(username));
        }
        if let Err(e) = classify(status) {
            metrics::record_provider_call("status_error");
            tracing::warn!(status = %status, "feed provider returned an error");
            return Err(e.into());
        }

        let body = response.text().await.map_err(|e| {
            metrics::record_provider_call("transport_error");
            FeedError::Transport(e)
        })?;

        let parsed = atom::parse(&body).inspect_err(|_| {
            metrics::record_provider_call("decode_error");
        })?;
        metrics::record_provider_call("ok");

        let feed = parsed.into_feed(username);
        tracing::debug!(songs = feed.songs.len(), "feed normalized");
        Ok(feed)
    }
}
