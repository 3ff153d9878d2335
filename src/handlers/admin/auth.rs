//! Admin session handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use crate::handlers::extract::Json;
use crate::services::{Claims, LoginRequest, LoginResponse};
use crate::state::AppState;
use crate::utils::errors::Result;

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Result<Json<LoginResponse>> {
    Ok(Json(state.services.auth_service.login(request).await?))
}

pub async fn logout(State(state): State<AppState>, Extension(claims): Extension<Claims>) -> StatusCode {
    state.services.auth_service.logout(&claims);
    StatusCode::NO_CONTENT
}
