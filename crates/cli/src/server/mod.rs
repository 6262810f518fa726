//! HTTP trigger server

mod routes;
pub mod signature;

use axum::{
    Router,
    routing::{get, post},
};
use hirecast_domain::usecases::PublishOrchestrator;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use signature::SignatureVerifier;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<PublishOrchestrator>,
    pub verifier: Arc<SignatureVerifier>,
}

/// Build the Axum application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health_handler))
        .route("/api/social/publish", post(routes::publish_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
