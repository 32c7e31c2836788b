//! Catalog and basket API server.
//!
//! Serves shopping-cart and product-catalog endpoints behind a credential
//! gate: every request must carry `X-User-Token: Basic <base64(user:pass)>`
//! matching the configured reference credential, unless its path contains
//! one of the exempt patterns.
//!
//! # Startup Flow
//!
//! 1. Load configuration from environment variables
//! 2. Build the credential gate from it
//! 3. Build HTTP router with routes and middleware
//! 4. Start server on configured port

mod config;
mod error;
mod gate;
mod handlers;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging with tracing subscriber. Reads RUST_LOG environment variable (defaults to "info" level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = config::Config::from_env()?;
    tracing::info!("Configuration loaded");

    let gate = Arc::new(gate::CredentialGate::new(config.gate_config()));
    tracing::info!(
        principal = gate.config().credential.principal(),
        exempt_patterns = gate.config().exempt_paths.len(),
        "Credential gate configured"
    );

    let app = routes::router(state::AppState::new(), gate);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
