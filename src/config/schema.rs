//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both services.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration shared by the API and the web frontend.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Backend API settings.
    pub api: ApiConfig,

    /// Web frontend settings.
    pub web: WebConfig,

    /// Remote feed provider settings.
    pub provider: ProviderConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request hardening.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Identity provider stand-in.
    pub auth: AuthConfig,
}

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bind address (e.g., "0.0.0.0:8090").
    pub bind_address: String,

    /// Username whose feed is served until an admin selects another one.
    pub default_username: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8090".to_string(),
            default_username: "xcrochet".to_string(),
        }
    }
}

/// Web frontend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address (e.g., "0.0.0.0:8089").
    pub bind_address: String,

    /// Hostname of the backend API.
    pub api_hostname: String,

    /// Port of the backend API.
    pub api_port: u16,

    /// Name of the cookie carrying the session id.
    pub session_cookie: String,

    /// Lifetime of a session, in seconds, counted from sign-in.
    pub session_ttl_secs: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8089".to_string(),
            api_hostname: "localhost".to_string(),
            api_port: 8090,
            session_cookie: "listen_feed_session".to_string(),
            session_ttl_secs: 8 * 60 * 60,
        }
    }
}

impl WebConfig {
    /// Base URL of the backend API routes, with a trailing slash.
    pub fn api_base_url(&self) -> String {
        format!("http://{}:{}/api/", self.api_hostname, self.api_port)
    }
}

/// Remote feed provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Scheme and host of the provider (e.g., "https://listenbrainz.org").
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://listenbrainz.org".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout (total time to produce a response) in seconds.
    pub request_secs: u64,

    /// Timeout for calls to the feed provider or the sibling service, in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 5,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Enable security headers on HTML responses.
    pub enable_headers: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            max_body_size: 64 * 1024,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Static token table standing in for the identity provider.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    pub tokens: Vec<TokenConfig>,
}

/// One access token and the identity it resolves to.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Bearer token value.
    pub token: String,

    pub user_id: String,

    pub username: String,

    #[serde(default)]
    pub given_name: String,

    #[serde(default)]
    pub family_name: String,

    /// Granted roles (e.g., "admin").
    #[serde(default)]
    pub roles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.api.bind_address, "0.0.0.0:8090");
        assert_eq!(config.api.default_username, "xcrochet");
        assert_eq!(config.web.api_port, 8090);
        assert_eq!(config.web.session_ttl_secs, 28800);
        assert_eq!(config.timeouts.upstream_secs, 5);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.auth.tokens.is_empty());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            default_username = "alice"

            [observability]
            log_format = "json"

            [[auth.tokens]]
            token = "t1"
            user_id = "1"
            username = "admin"
            roles = ["admin"]
            "#,
        )
        .unwrap();

        assert_eq!(config.api.default_username, "alice");
        assert_eq!(config.api.bind_address, "0.0.0.0:8090");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.auth.tokens.len(), 1);
        assert_eq!(config.auth.tokens[0].roles, vec!["admin".to_string()]);
        assert_eq!(config.auth.tokens[0].given_name, "");
    }

    #[test]
    fn test_api_base_url() {
        let web = WebConfig {
            api_hostname: "api.internal".into(),
            api_port: 9000,
            ..WebConfig::default()
        };
        assert_eq!(web.api_base_url(), "http://api.internal:9000/api/");
    }
}
