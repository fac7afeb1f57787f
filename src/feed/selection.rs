//! The currently selected feed username.

use std::sync::{PoisonError, RwLock};

/// Username whose feed `/api/feed` serves.
///
/// Readers share the lock, a writer holds it exclusively, so a reader only
/// ever sees a value some writer stored in full. Lives as long as the
/// process and starts from the configured default on every restart.
#[derive(Debug)]
pub struct Selection {
    username: RwLock<String>,
}

impl Selection {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            username: RwLock::new(initial.into()),
        }
    }

    /// Current username.
    pub fn get(&self) -> String {
        // A writer only ever swaps in a complete String, so the value behind
        // a poisoned lock is still whole.
        self.username
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the username.
    pub fn set(&self, username: impl Into<String>) {
        let username = username.into();
        *self
            .username
            .write()
            .unwrap_or_else(PoisonError::into_inner) = username;
    }
}
