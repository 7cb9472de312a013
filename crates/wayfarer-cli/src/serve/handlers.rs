//! HTTP route handlers for the query server.
//!
//! Handlers are kept thin, delegating the pipeline work to
//! `wayfarer-core`. Invalid requests map to 400, step failures to 500.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::models::{ErrorResponse, HealthResponse};
use super::AppState;

/// POST `/query` - Run the pipeline for one question.
///
/// Request body is the event-like object:
/// ```json
/// { "question": "What is the capital of Austria?" }
/// ```
///
/// Response body on success:
/// ```json
/// { "body": "...", "status": 200 }
/// ```
pub async fn query(
    State(state): State<Arc<AppState>>,
    Json(event): Json<serde_json::Value>,
) -> Response {
    match state.pipeline.handle(&event).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) if e.is_client_error() => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "pipeline failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET `/health` - Liveness probe.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
