//! Sales Pulse — retail sales analytics dashboard service.
//!
//! Main entry point that loads the dataset and starts the API server.

use clap::Parser;
use pulse_api::ApiServer;
use pulse_core::config::AppConfig;
use pulse_dataset::store::DatasetStore;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "sales-pulse")]
#[command(about = "Retail sales analytics dashboard service")]
#[command(version)]
struct Cli {
    /// Path to the retail sales CSV dataset (overrides config)
    #[arg(long, env = "SALES_PULSE__DATASET__PATH")]
    dataset: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "SALES_PULSE__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Bind host (overrides config)
    #[arg(long, env = "SALES_PULSE__API__HOST")]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sales_pulse=info,pulse_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("Sales Pulse starting up");

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(dataset) = cli.dataset {
        config.dataset.path = dataset;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(host) = cli.host {
        config.api.host = host;
    }

    info!(
        dataset = %config.dataset.path,
        http_port = config.api.http_port,
        "Configuration loaded"
    );

    // Eagerly load the dataset; a missing or malformed file is fatal.
    let store = Arc::new(DatasetStore::new(config.dataset.clone()));
    let dataset = store.get_or_load()?;
    info!(
        rows = dataset.len(),
        categories = dataset.categories().len(),
        "Dataset ready"
    );

    let api_server = ApiServer::new(config, store);

    // Start metrics exporter
    if let Err(e) = api_server.start_metrics().await {
        error!(error = %e, "Failed to start metrics exporter");
    }

    info!("Sales Pulse is ready to serve traffic");

    // Start HTTP server (blocks until shutdown)
    api_server.start_http().await?;

    Ok(())
}
