//! Authentication seam.
//!
//! Token issuance, role management and sign-in flows belong to the identity
//! provider. This module only defines what the services need from it: an
//! [`Authenticator`] resolving an access token to a [`Principal`].
//!
//! [`StaticTokens`] resolves tokens from the `[[auth.tokens]]` config table
//! and is what both services use out of the box.

pub mod middleware;

use std::collections::HashMap;

use crate::config::TokenConfig;

/// Role allowed to change the selected feed.
pub const ADMIN_ROLE: &str = "admin";

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub username: String,
    pub given_name: String,
    pub family_name: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn is_granted_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Name shown to the user; falls back to the username.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.given_name, self.family_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

/// Resolves access tokens to principals.
pub trait Authenticator: Send + Sync {
    /// `None` if the token is unknown or no longer valid.
    fn authenticate(&self, token: &str) -> Option<Principal>;
}

/// Token table loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokens {
    tokens: HashMap<String, Principal>,
}

impl StaticTokens {
    pub fn from_config(entries: &[TokenConfig]) -> Self {
        let tokens = entries
            .iter()
            .map(|entry| {
                let principal = Principal {
                    user_id: entry.user_id.clone(),
                    username: entry.username.clone(),
                    given_name: entry.given_name.clone(),
                    family_name: entry.family_name.clone(),
                    roles: entry.roles.clone(),
                };
                (entry.token.clone(), principal)
            })
            .collect();
        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Authenticator for StaticTokens {
    fn authenticate(&self, token: &str) -> Option<Principal> {
        self.tokens.get(token).cloned()
    }
}
