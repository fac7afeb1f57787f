//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → CLI overrides applied in main.rs
//!     → handed by value to the API or web server
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs (or no file at all)
//! - Validation separates syntactic (serde) from semantic checks
//! - The selected feed username is runtime state, not configuration;
//!   only its initial value lives here

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::{
    ApiConfig, AuthConfig, LogFormat, ObservabilityConfig, ProviderConfig, SecurityConfig,
    TimeoutConfig, TokenConfig, WebConfig,
};
