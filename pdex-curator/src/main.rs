//! pdex-curator - Portrait catalog curation service
//!
//! Harvests images from web pages into a staging area, flags content already
//! in the catalog, promotes approved images and keeps metadata records in step
//! with the canonical image store.

use anyhow::{Context, Result};
use clap::Parser;
use pdex_common::config::{LoggingConfig, RootFolderResolver, TomlConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pdex_curator::{build_router, AppState, CatalogService};

/// Command-line arguments for pdex-curator
#[derive(Parser, Debug)]
#[command(name = "pdex-curator")]
#[command(about = "Portrait catalog curation service")]
#[command(version)]
struct Args {
    /// Port to listen on (overrides TOML)
    #[arg(short, long, env = "PDEX_PORT")]
    port: Option<u16>,

    /// Root folder holding the image and metadata stores
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Explicit TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = TomlConfig::load_or_default(args.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config.logging)?;

    info!("Starting pdex-curator v{}", env!("CARGO_PKG_VERSION"));

    let root_folder = RootFolderResolver::new(args.root_folder, &config).resolve();
    info!("Root folder: {}", root_folder.display());

    let stores = config.stores(&root_folder);
    stores
        .ensure_directories()
        .context("Failed to initialize store directories")?;
    info!("Canonical store: {}", stores.canonical.display());
    info!("Staging area: {}", stores.staging.display());
    info!("Metadata store: {}", stores.metadata.display());

    let catalog = CatalogService::new(stores, config.fetch.clone())
        .context("Failed to initialize catalog service")?;
    let app = build_router(AppState::new(catalog));

    let port = args.port.unwrap_or(config.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// RUST_LOG wins over the configured level; output goes to the configured
/// file or stderr
fn init_tracing(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("{},tower_http=info", logging.level)))
        .context("Invalid log level")?;

    match &logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt().with_env_filter(filter).init();
        }
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
