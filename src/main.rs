//! Circuit breaker demo server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request       ┌──────────────────────────────────────────────┐
//!     ─────────────────────┼─▶ breaker middleware ──▶ /fail, /success     │
//!                          │        │    ▲                    │           │
//!                          │  admit │    │ record(status)     │           │
//!                          │        ▼    │                    ▼           │
//!                          │     ┌──────────┐          ┌────────────┐     │
//!                          │     │ Breaker  │◀─────────│ registry   │     │
//!                          │     └──────────┘          └────────────┘     │
//!                          │                                 ▲            │
//!     Admin / CLI          │                                 │            │
//!     ─────────────────────┼─▶ /admin/breakers/{name}/{open,close} ──────┘ │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use circuit_breaker::config::{load_config, AppConfig};
use circuit_breaker::observability::{logging, metrics};
use circuit_breaker::HttpServer;

#[derive(Parser)]
#[command(name = "circuit-breaker")]
#[command(about = "Demo server guarding two routes with a circuit breaker", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("circuit-breaker v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.server.bind_address,
        breaker = %config.breaker.name,
        interval_secs = config.breaker.interval_secs,
        timeout_secs = config.breaker.timeout_secs,
        trip = ?config.breaker.trip,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
