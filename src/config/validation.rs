//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, URLs and value ranges
//! - Detect duplicate access tokens
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("provider.base_url: '{0}' is not an http(s) URL")]
    InvalidProviderUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("auth.tokens: token for user '{0}' is empty")]
    EmptyToken(String),

    #[error("auth.tokens: token for user '{0}' is declared more than once")]
    DuplicateToken(String),
}

/// Check a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "api.bind_address", &config.api.bind_address);
    check_address(&mut errors, "web.bind_address", &config.web.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    match Url::parse(&config.provider.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => {}
        _ => errors.push(ValidationError::InvalidProviderUrl(
            config.provider.base_url.clone(),
        )),
    }

    if config.web.api_hostname.trim().is_empty() {
        errors.push(ValidationError::Empty("web.api_hostname"));
    }
    if config.web.session_cookie.trim().is_empty() {
        errors.push(ValidationError::Empty("web.session_cookie"));
    }
    if config.web.api_port == 0 {
        errors.push(ValidationError::Zero("web.api_port"));
    }
    if config.web.session_ttl_secs == 0 {
        errors.push(ValidationError::Zero("web.session_ttl_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.upstream_secs"));
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }

    let mut seen = HashSet::new();
    for entry in &config.auth.tokens {
        if entry.token.is_empty() {
            errors.push(ValidationError::EmptyToken(entry.username.clone()));
        } else if !seen.insert(entry.token.as_str()) {
            errors.push(ValidationError::DuplicateToken(entry.username.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
