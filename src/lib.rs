//! Listening-feed services: a backend feed API and a web frontend.

pub mod api;
pub mod auth;
pub mod config;
pub mod feed;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod web;

pub use api::ApiServer;
pub use config::AppConfig;
pub use lifecycle::Shutdown;
pub use web::WebServer;
