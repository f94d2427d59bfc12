// --- File: crates/services/dentalbook_backend/src/main.rs ---
use dentalbook_backend::{app, app_state::AppState};
use dentalbook_common::{init_with_config, log_error};
use dentalbook_config::load_config;
use std::error::Error;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = Arc::new(load_config().inspect_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
    })?);

    // Keep the guard alive so buffered file logs are flushed on exit.
    let _log_guard = init_with_config(config.logging.as_ref());

    let state = AppState::new(config.clone()).await?;
    let app = app(&state);

    let addr = config.bind_address();
    let listener = TcpListener::bind(&addr).await.inspect_err(|e| {
        log_error(e, &format!("Failed to bind {}", addr));
    })?;
    info!("Starting server at http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
