//! crisp-relay
//!
//! Answers Crisp chat webhooks and proxies the knowledge-base browser client
//! to Supabase.
//!
//! ```text
//!   Crisp ──POST /crisp/message──▶ ┌───────────────────────────┐ ──reply──▶ Crisp REST API
//!                                  │        crisp-relay        │
//!   Browser ──/api/*─────────────▶ │  CORS → bearer → handler  │ ──proxy──▶ Supabase
//!           ◀── status + body ──── └───────────────────────────┘ ◀─────────
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use crisp_relay::config::load_config;
use crisp_relay::observability::{logging, metrics};
use crisp_relay::{AppState, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "crisp-relay")]
#[command(about = "Crisp webhook relay and Supabase proxy", long_about = None)]
struct Cli {
    /// TOML config file. Environment variables override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding config and PORT.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let (mut config, warnings) = load_config(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!("crisp-relay v{} starting", env!("CARGO_PKG_VERSION"));

    for warning in &warnings {
        tracing::warn!(%warning, "Configuration incomplete");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        dispatch_mode = ?config.crisp.mode,
        backend_configured = !config.backend.url.is_empty(),
        upstream_timeout_secs = config.timeouts.upstream_secs,
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

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppState::from_config(config)?);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
