//! Wire types of the feed API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's recent listens, in the order the provider delivered them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feed {
    pub username: String,
    #[serde(default)]
    pub songs: Vec<Song>,
}

impl Feed {
    /// A feed with no songs.
    pub fn empty(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            songs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub listened_at: DateTime<Utc>,
}

/// Body of `POST /api/select_feed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFeed {
    pub name: String,
}

/// Body of `GET /api/feed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    /// Whether the caller may change the selected feed.
    pub write_access: bool,
    pub feed: Option<Feed>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_feed_serializes_songs_as_array() {
        let value = serde_json::to_value(Feed::empty("alice")).unwrap();
        assert_eq!(value, json!({ "username": "alice", "songs": [] }));
    }

    #[test]
    fn test_feed_response_shape() {
        let response = FeedResponse {
            write_access: true,
            feed: Some(Feed {
                username: "alice".into(),
                songs: vec![Song {
                    title: "Song 1".into(),
                    listened_at: "2024-01-01T12:00:00Z".parse().unwrap(),
                }],
            }),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "write_access": true,
                "feed": {
                    "username": "alice",
                    "songs": [{ "title": "Song 1", "listened_at": "2024-01-01T12:00:00Z" }]
                }
            })
        );
    }

    #[test]
    fn test_null_feed() {
        let response: FeedResponse =
            serde_json::from_str(r#"{"write_access": false, "feed": null}"#).unwrap();
        assert_eq!(response.feed, None);
    }
}
