//! # Balcão POS API Server
//!
//! Serves the sale commit engine, the receivable ledger, catalog lookups,
//! and the reporting views over HTTP.
//!
//! ## Startup Sequence
//! ```text
//! tracing init ──► config load ──► database pool + migrations ──► serve
//! ```
//!
//! All long-lived services (the database handle) are constructed here and
//! injected down; shutdown closes the pool after the listener drains.

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use balcao_db::{Database, DbConfig};
use balcao_pos_api::config::PosConfig;
use balcao_pos_api::create_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Balcão POS API server");

    // Load configuration
    let config = PosConfig::load().context("loading configuration")?;
    info!(
        port = config.http_port,
        database = %config.database_path,
        "Configuration loaded"
    );

    // Connect to the database (runs migrations)
    let db = Database::new(
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections),
    )
    .await
    .context("initializing database")?;
    info!("Database ready");

    // Build the router and serve
    let app = create_router(db.clone());

    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    db.close().await;
    info!("Shutdown complete");

    Ok(())
}

/// Resolves when the process receives ctrl-c.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
