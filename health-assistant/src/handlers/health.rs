use crate::dtos::{HealthResponse, MessageResponse};
use crate::startup::AppState;
use axum::{extract::State, http::Uri, Json};
use service_core::error::AppError;

pub const ROOT_MESSAGE: &str = "Health Track AI backend is running!";

/// Liveness acknowledgement on `/`.
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Probe endpoint for Docker/K8s.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "health-assistant",
        version: env!("CARGO_PKG_VERSION"),
        model: state.assistant.model().to_string(),
        ocr_available: state.extractor.ocr_available(),
        provider_configured: state.assistant.is_ready().await,
    })
}

pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
