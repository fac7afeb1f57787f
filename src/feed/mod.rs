//! Listening feed subsystem.
//!
//! # Data Flow
//! ```text
//! GET /api/feed
//!     → selection.rs (read the selected username)
//!     → provider.rs (GET syndication feed, classify status)
//!     → atom.rs (parse XML, map entries to songs)
//!     → types.rs (Feed, serialized as JSON)
//!
//! POST /api/select_feed
//!     → selection.rs (replace the selected username)
//! ```

pub mod atom;
pub mod provider;
pub mod selection;
pub mod types;

pub use provider::{FeedError, FeedProvider};
pub use selection::Selection;
pub use types::{Feed, FeedResponse, SelectedFeed, Song};
