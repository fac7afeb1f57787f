//! listen-feed
//!
//! # Architecture Overview
//!
//! ```text
//!   browser ──▶ web (:8089) ──▶ api (:8090) ──▶ feed provider (Atom)
//!                 │  session cookie     │  bearer token
//!                 │  X-Sender-Trace-Id  │  selected username (shared)
//! ```
//!
//! Both services run from this binary; pick one with a subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use listen_feed::config::{load_config, AppConfig};
use listen_feed::lifecycle::{wait_for_signal, Shutdown};
use listen_feed::observability::{logging, metrics};
use listen_feed::{ApiServer, WebServer};

#[derive(Parser)]
#[command(name = "listen-feed")]
#[command(about = "Listening feed API and web frontend", long_about = None)]
struct Cli {
    /// TOML config file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the backend feed API
    Api {
        /// Override `api.bind_address`
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Run the web frontend
    Web {
        /// Override `web.bind_address`
        #[arg(short, long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    match &cli.command {
        Commands::Api { bind: Some(bind) } => config.api.bind_address = bind.clone(),
        Commands::Web { bind: Some(bind) } => config.web.bind_address = bind.clone(),
        _ => {}
    }

    logging::init_logging(&config.observability)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "listen-feed starting");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    tokio::spawn(wait_for_signal(shutdown.clone()));

    match cli.command {
        Commands::Api { .. } => {
            let listener = TcpListener::bind(&config.api.bind_address).await?;
            tracing::info!(
                address = %listener.local_addr()?,
                default_username = %config.api.default_username,
                provider = %config.provider.base_url,
                "feed api listening"
            );
            ApiServer::new(&config)?
                .run(listener, shutdown.subscribe())
                .await?;
        }
        Commands::Web { .. } => {
            let listener = TcpListener::bind(&config.web.bind_address).await?;
            tracing::info!(
                address = %listener.local_addr()?,
                api = %config.web.api_base_url(),
                "web frontend listening"
            );
            WebServer::new(&config)?
                .run(listener, shutdown.subscribe())
                .await?;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
