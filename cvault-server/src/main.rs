//! Corporate Vault Relay Server
//!
//! An HTTP relay that turns treasury operations into signed transactions
//! against the USDx token and the CorporateVault contract on Arbitrum.

mod api;
mod config;
mod server;
mod shutdown;
mod state;

use clap::Parser;
use config::ConfigLoader;
use cvault_core::ledger::{EvmLedger, Ledger};
use cvault_core::relay::RelayProcessor;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Corporate Vault relay - signs and submits vault transactions
#[derive(Parser, Debug)]
#[command(name = "cvault-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (optional)
    #[arg(short, long, env = "CVAULT_CONFIG", default_value = "./cvault-config.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3000)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let dotenv = dotenvy::dotenv();

    // Initialize tracing
    init_tracing();

    if let Ok(path) = dotenv {
        tracing::debug!("Loaded environment from {:?}", path);
    }

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting cvault-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen);
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!(ledger = ?loaded_config.ledger, "Configuration loaded");

    let listen_addr = loaded_config.server.listen;

    // Connect the signing ledger client
    let ledger = EvmLedger::connect(&loaded_config.ledger).map_err(|e| {
        tracing::error!("Failed to set up the ledger client: {}", e);
        e
    })?;
    tracing::info!(
        signer = %ledger.signer_address(),
        usdx = %loaded_config.ledger.usdx_address,
        vault = %ledger.vault_address(),
        rpc = %loaded_config.ledger.rpc_url,
        "Ledger client ready"
    );

    // Create application state
    let state = AppState::new(RelayProcessor::new(Arc::new(ledger)));

    // Build the router
    let router = build_router(state, &loaded_config.server);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    let result = run_server(router, listen_addr).await;
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
