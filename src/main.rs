//! Scholar search relay.
//!
//! Accepts `GET /search?q=...`, forwards the query as a title search to the
//! configured scholarly-works API and relays the answer back.
//!
//! ```text
//!   Client ──GET /search?q──▶ ┌──────────────┐ ──GET {base}/works?filter=──▶ Upstream
//!                             │ scholar-relay│                                 API
//!   Client ◀──JSON / error─── └──────────────┘ ◀──────── JSON / status ────────
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use scholar_relay::config::loader;
use scholar_relay::observability::{logging, metrics, telemetry::TelemetryStatus};
use scholar_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "scholar-relay")]
#[command(about = "HTTP relay for scholarly-works title search", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen port (overrides PORT and the config file).
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // A missing .env file is fine
    let dotenv = dotenvy::dotenv().ok();

    let mut config = loader::load(cli.config.as_deref())?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }

    logging::init_logging(&config.observability)?;

    tracing::info!("scholar-relay v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        upstream_configured = config.upstream.base_url.is_some(),
        "Configuration loaded"
    );

    TelemetryStatus::from_config(&config.observability).log();

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        if let Err(e) = metrics::init_metrics(addr, &config.observability.app_name) {
            tracing::error!(error = %e, "Failed to start metrics endpoint");
        }
    }

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Search relay listening at http://{}", local_addr);

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
