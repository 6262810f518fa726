//! Handlers for the health check and the signed publish trigger

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use hirecast_domain::{PublishRequest, compute_dedup_key, usecases::OrchestrateError};
use serde::Serialize;

use super::AppState;
use super::signature::SIGNATURE_HEADER;

pub const DEDUP_HEADER: &str = "x-hirecast-dedup-key";

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    platforms: Vec<&'static str>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.into(),
        }),
    )
        .into_response()
}

/// Health check endpoint listing the platforms with a registered publisher
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let platforms = state
        .orchestrator
        .registry()
        .platforms()
        .iter()
        .map(|p| p.as_str())
        .collect();

    Json(HealthResponse {
        status: "ok",
        platforms,
    })
}

/// Queue trigger: verify the signature, then fan the job out
///
/// The body is read raw so the signature covers the exact bytes delivered.
pub async fn publish_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    if let Err(error) = state.verifier.verify(signature, &body) {
        tracing::warn!(error = %error, "Rejected trigger call");
        return error_response(StatusCode::UNAUTHORIZED, error.to_string());
    }

    let request: PublishRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(error) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid request body: {}", error),
            );
        }
    };

    let dedup_key = compute_dedup_key(
        request.job.id.as_deref().unwrap_or_default(),
        &request.organization_id,
        &request.platforms,
    );
    tracing::info!(
        organization_id = %request.organization_id,
        team_id = %request.team_id,
        dedup_key = %dedup_key,
        "Trigger received"
    );

    match state.orchestrator.publish_request(request).await {
        Ok(results) => {
            let mut response = Json(results).into_response();
            if let Ok(value) = HeaderValue::from_str(&dedup_key) {
                response.headers_mut().insert(DEDUP_HEADER, value);
            }
            response
        }
        Err(OrchestrateError::BadRequest(message)) => {
            tracing::warn!(error = %message, "Rejected publish request");
            error_response(StatusCode::BAD_REQUEST, message)
        }
    }
}
