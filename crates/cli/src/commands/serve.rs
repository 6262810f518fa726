//! Serve command - HTTP trigger for the publish queue

use anyhow::{Context, Result};
use hirecast_adapters::Credential;
use std::path::PathBuf;
use std::sync::Arc;

use crate::args::ServeArgs;
use crate::commands::publish::{Delivery, build_orchestrator};
use crate::config::AppConfig;
use crate::server::{AppState, SignatureVerifier, build_router};

pub async fn execute(args: ServeArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let orchestrator = build_orchestrator(&config, &Delivery::Live);
    let verifier = SignatureVerifier::new(
        vec![
            Credential::from_env(&config.server.signing_key_env),
            Credential::from_env(&config.server.next_signing_key_env),
        ],
        config.server.allow_unsigned,
    );

    if !verifier.has_keys() {
        if config.server.allow_unsigned {
            tracing::warn!("No signing key set, accepting unsigned trigger calls");
        } else {
            tracing::warn!(
                env = %config.server.signing_key_env,
                "No signing key set, every trigger call will be rejected"
            );
        }
    }

    let platforms = orchestrator.registry().platforms();
    let state = AppState {
        orchestrator: Arc::new(orchestrator),
        verifier: Arc::new(verifier),
    };
    let app = build_router(state);

    let addr = args.bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!(addr = %addr, ?platforms, "Starting trigger server");
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
