use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_store::config::Config;
use booking_store::AppState;

#[derive(Parser, Debug)]
#[command(name = "booking-store")]
#[command(author, version, about = "A small REST service for hotel bookings", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "BOOKING_CONFIG", default_value = "bookings.toml")]
    config: PathBuf,

    /// Override log level
    #[arg(short, long, env = "BOOKING_LOG_LEVEL")]
    log_level: Option<String>,

    /// Override the listening port
    #[arg(short, long, env = "BOOKING_PORT")]
    port: Option<u16>,

    /// Override the SQLite database file
    #[arg(long, env = "BOOKING_DATABASE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::load(&cli.config)?;
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(database) = cli.database {
        config.database.path = database;
    }

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting booking-store v{}", env!("CARGO_PKG_VERSION"));

    // Initialize database (creates the bookings table if absent)
    let db = booking_store::db::init(&config.database).await?;

    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(config, db.clone()));
    let app = booking_store::api::create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("API server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
