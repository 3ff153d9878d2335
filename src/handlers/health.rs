//! Health check handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use crate::state::AppState;

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let health = state.services.health_check().await;
    let status = if health.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if health.is_healthy() { "ok" } else { "degraded" },
            "version": crate::VERSION,
            "checks": health,
            "issues": health.get_issues(),
        })),
    )
}
