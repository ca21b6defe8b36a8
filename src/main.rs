//! Locale-Aware Route Canonicalization Gateway
//!
//! A request-time canonicalization front for a multilingual site, built
//! with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌────────────────────────────────────────────────────┐
//!                    │               CANONICALIZATION GATEWAY             │
//!                    │                                                    │
//!   Client Request   │  ┌─────────┐   ┌───────────────────────────────┐   │
//!   ─────────────────┼─▶│  http   │──▶│            engine             │   │
//!                    │  │ server  │   │ classify → cors → slash →     │   │
//!                    │  └─────────┘   │ locale → translate → parse    │   │
//!                    │                └──────┬──────────┬─────────────┘   │
//!                    │                       │          │                 │
//!                    │              redirect │          │ forward         │
//!   Client Response  │  ┌─────────┐          │          ▼                 │
//!   ◀────────────────┼──│ 308 +   │◀─────────┘   ┌──────────────┐         │
//!                    │  │Location │              │   upstream   │◀────────┼──── Page
//!                    │  └─────────┘              │   client     │         │     Resolution
//!                    │                           └──────────────┘         │
//!                    │  ┌──────────────────────────────────────────────┐  │
//!                    │  │            Cross-Cutting Concerns            │  │
//!                    │  │  ┌────────┐ ┌─────────────┐ ┌─────────────┐  │  │
//!                    │  │  │ config │ │observability│ │  lifecycle  │  │  │
//!                    │  │  └────────┘ └─────────────┘ └─────────────┘  │  │
//!                    │  └──────────────────────────────────────────────┘  │
//!                    └────────────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod engine;
pub mod http;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{load_config, GatewayConfig};
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "locale-gateway", about = "Locale-aware route canonicalization gateway")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "locale_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("locale-gateway v0.1.0 starting");

    // Load configuration; parse or validation failures are fatal here,
    // never at request time.
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        default_locale = %config.locales.default,
        supported_locales = ?config.locales.supported,
        cache_ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Initialize metrics server
    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            crate::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    // Create and run HTTP server
    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
