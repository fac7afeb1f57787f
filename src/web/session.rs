//! Browser sessions.
//!
//! A session pairs the access token a user signed in with and the principal
//! it resolved to. The browser only holds a random session id in a cookie.
//! Sessions expire a fixed time after sign-in; expired entries read as absent
//! and are evicted whenever a new session is created.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};

use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::auth::Principal;

/// A signed-in browser user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub principal: Principal,
}

#[derive(Debug)]
struct Entry {
    session: Session,
    created: Instant,
}

/// In-memory session table. Cheap to clone; clones share the table.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookie_name: String,
    ttl: Duration,
    sessions: Arc<RwLock<HashMap<String, Entry>>>,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            ttl,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn is_live(&self, entry: &Entry) -> bool {
        entry.created.elapsed() < self.ttl
    }

    /// Store `session` under a new id and return the id.
    pub fn create(&self, session: Session) -> String {
        let id = Uuid::new_v4().simple().to_string();
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);

        let before = sessions.len();
        sessions.retain(|_, entry| self.is_live(entry));
        let evicted = before - sessions.len();
        if evicted > 0 {
            tracing::debug!(evicted, "expired sessions evicted");
        }

        sessions.insert(
            id.clone(),
            Entry {
                session,
                created: Instant::now(),
            },
        );
        id
    }

    /// Live session stored under `id`.
    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .filter(|entry| self.is_live(entry))
            .map(|entry| entry.session.clone())
    }

    pub fn remove(&self, id: &str) -> Option<Session> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .map(|entry| entry.session)
    }

    /// Entries in the table, expired ones included until evicted.
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Session id carried by the request's cookies, if any.
    pub fn session_id<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_empty())
    }

    /// Live session for the request, if any.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<Session> {
        self.session_id(headers).and_then(|id| self.get(id))
    }

    /// `Set-Cookie` value carrying `id`, expiring with the session.
    pub fn cookie(&self, id: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            id,
            self.ttl.as_secs()
        )
    }

    /// `Set-Cookie` value expiring the session cookie.
    pub fn expired_cookie(&self) -> String {
        format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", self.cookie_name)
    }
}
