//! price-resolver service binary.
//!
//! Loads configuration, builds the catalog, installs the telemetry
//! exporters, and runs the HTTP server until shutdown.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use price_resolver::catalog::Catalog;
use price_resolver::config::{load_config, ServiceConfig};
use price_resolver::http::HttpServer;
use price_resolver::lifecycle::Shutdown;
use price_resolver::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "price-resolver")]
#[command(about = "Instrumented food-price resolution service", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability.log_level);
    tracing::info!("price-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    let catalog = match &config.catalog.data_path {
        Some(path) => Catalog::from_path(path)?,
        None => Catalog::sample(),
    };
    tracing::info!(
        suppliers = catalog.supplier_count(),
        vendors = catalog.vendor_count(),
        "catalog loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(err) = metrics::init_metrics(addr, &config.observability) {
                    tracing::error!(error = %err, "failed to install metrics exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "listening for connections");

    let shutdown = Shutdown::new();
    shutdown.spawn_signal_listener();

    let server = HttpServer::new(config, catalog)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
