//! Server health checker.
//!
//! Probes registered servers on demand and reports their status.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                 HEALTH CHECKER                   │
//!                         │                                                  │
//!     Client Query        │  ┌─────────┐    ┌──────────┐    ┌────────────┐   │
//!     ────────────────────┼─▶│  http   │───▶│  query   │───▶│  registry  │   │
//!                         │  │ server  │    │  facade  │    │ (servers)  │   │
//!                         │  └─────────┘    └────┬─────┘    └─────┬──────┘   │
//!                         │                      │                │          │
//!                         │                      ▼                ▼          │
//!                         │               ┌────────────┐   ┌────────────┐    │
//!                         │               │   probe    │──▶│   state    │    │
//!                         │               │  executor  │   │  machine   │    │
//!                         │               └─────┬──────┘   └────────────┘    │
//!                         │                     │                            │
//!                         │  ┌──────────────────┼────────────────────────┐   │
//!                         │  │  config │ observability │ lifecycle       │   │
//!                         │  └──────────────────┼────────────────────────┘   │
//!                         └─────────────────────┼────────────────────────────┘
//!                                               ▼
//!                                        Monitored servers
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use health_checker::config::{load_config, MonitorConfig};
use health_checker::lifecycle::{self, Shutdown};
use health_checker::observability::logging;

#[derive(Parser)]
#[command(name = "health-checker")]
#[command(about = "Probe registered servers on demand and report their status", long_about = None)]
struct Args {
    /// TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        "health-checker starting"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = lifecycle::build(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
