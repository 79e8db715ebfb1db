// Expense Tracker - Web Server
// Wires config, logging, the in-memory store and the API router together

use anyhow::{Context, Result};
use expense_tracker::{logging, router, AppState, InMemoryExpenseStore, ServerConfig, VERSION};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let config = ServerConfig::default();

    // Data lives only as long as the process
    let state = AppState::new(Arc::new(InMemoryExpenseStore::new()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("Failed to bind to {}", config.addr()))?;

    info!(version = VERSION, "Expense Tracker API running on {}", config.public_url());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep serving until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
