use std::sync::Arc;

use anyhow::{Context, Result};
use dotenv::dotenv;

use validator_api::config::ServerConfig;
use validator_api::events::TracingSink;
use validator_api::observability::Observability;
use validator_api::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = ServerConfig::from_env()?;

    let state = AppState::new(config.clone(), Arc::new(TracingSink), obs.registry);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", config.host, config.port))?;
    tracing::info!("Personal data validator listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Personal data validator stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {err}");
    }
}
