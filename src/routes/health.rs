use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::routes::AppState;

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// GET /ready - Readiness probe
///
/// Always ready; `storage` turns to `memory` once the contact file became
/// unusable and submissions no longer survive a restart.
pub async fn ready(State(app_state): State<AppState>) -> impl IntoResponse {
    let storage = app_state.store.mode();

    if storage != "file" {
        tracing::debug!("Readiness check: contact store is memory-backed");
    }

    (
        StatusCode::OK,
        Json(json!({"status": "ready", "storage": storage})),
    )
}
