//! Tally web server
//!
//! Main entry point for the Tally web application.

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tally_api::{AppState, create_router};
use tally_db::{SessionRepository, connect_and_migrate};
use tally_shared::{
    AppConfig,
    config::{LogConfig, LogFormat},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    init_tracing(&config.log);

    // Connect to database and bring the schema up to date
    let db = connect_and_migrate(&config.database).await?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    match SessionRepository::new(db.clone()).purge_expired().await {
        Ok(purged) => info!(purged, "Removed stale sessions"),
        Err(e) => warn!(error = %e, "Could not purge stale sessions"),
    }

    // Create application state and router
    let state = AppState::new(db, config.session.clone());
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Installs the global subscriber: text or JSON lines, filtered by `RUST_LOG`.
fn init_tracing(config: &LogConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tally=debug,tower_http=debug".into());

    let (text, json) = match config.format {
        LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
        LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(text)
        .with(json)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
