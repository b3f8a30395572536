//! Locale Gateway (v1)
//!
//! Front door for the bilingual charity site, built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────────────┐
//!                   │                   LOCALE GATEWAY                     │
//!                   │                                                      │
//!  Client Request   │  ┌─────────┐   ┌──────────────┐   ┌──────────────┐   │
//!  ─────────────────┼─▶│  http   │──▶│   routing    │──▶│    http      │───┼──▶ Upstream
//!                   │  │ server  │   │ LocaleRouter │   │ proxy_handler│   │    site
//!                   │  └─────────┘   └──────┬───────┘   └──────────────┘   │
//!                   │                       │ no locale prefix             │
//!  307 Location     │                       ▼                              │
//!  ◀────────────────┼────────────── /{locale}{path}?{query}                │
//!                   │                                                      │
//!                   │  ┌────────────────────────────────────────────────┐  │
//!                   │  │ config │ locale negotiation │ observability    │  │
//!                   │  │        │ lifecycle (signals, graceful shutdown)│  │
//!                   │  └────────────────────────────────────────────────┘  │
//!                   └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::config::{self, ConfigError, GatewayConfig};
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::{signals, Shutdown};
use locale_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-gateway", version)]
#[command(about = "Locale-routing gateway for the bilingual site", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        config::validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "locale-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        locales = ?config.locale.supported,
        default_locale = %config.locale.default,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::trigger_on_signal(&shutdown).await;
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
