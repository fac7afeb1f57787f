//! Provider Atom schema and its mapping to [`Feed`].

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::feed::types::{Feed, Song};

/// Root `<feed>` element of the listens syndication feed.
///
/// Only the fields the mapping needs (plus the header fields useful in
/// logs) are declared; every other element and attribute is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AtomFeed {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(default)]
    pub author: Option<AtomAuthor>,
    #[serde(rename = "entry", default)]
    pub entries: Vec<AtomEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AtomAuthor {
    pub name: String,
}

/// One listen.
#[derive(Debug, Clone, Deserialize)]
pub struct AtomEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    pub updated: DateTime<Utc>,
}

/// Parse a provider payload.
pub fn parse(xml: &str) -> Result<AtomFeed, quick_xml::DeError> {
    quick_xml::de::from_str(xml)
}

impl AtomFeed {
    /// Map entries to songs for `username`, keeping entry order.
    ///
    /// The listen time is the entry's `updated` timestamp, not `published`.
    pub fn into_feed(self, username: &str) -> Feed {
        Feed {
            username: username.to_string(),
            songs: self.entries.into_iter().map(Song::from).collect(),
        }
    }
}

impl From<AtomEntry> for Song {
    fn from(entry: AtomEntry) -> Self {
        Song {
            title: entry.title,
            listened_at: entry.updated,
        }
    }
}
