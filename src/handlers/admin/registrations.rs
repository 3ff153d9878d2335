//! Registration management handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use uuid::Uuid;
use crate::handlers::extract::{Json, Path, Query};
use crate::models::{Registration, RegistrationFilter, UpdateStatusRequest};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

/// Registrations filtered by `?search=` and `?status=`, newest first
pub async fn list_registrations(
    State(state): State<AppState>,
    Query(filter): Query<RegistrationFilter>,
) -> Result<Json<Vec<Registration>>> {
    Ok(Json(state.services.registration_service.list(&filter).await?))
}

pub async fn get_registration(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Registration>> {
    Ok(Json(state.services.registration_service.get(id).await?))
}

pub async fn update_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Registration>> {
    let registration = state.services.registration_service.set_status(id, request.status).await?;
    log_admin_action(&claims.sub, "update_registration_status", Some(&id.to_string()), Some(request.status.as_str()));

    Ok(Json(registration))
}

pub async fn delete_registration(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.services.registration_service.delete(id).await?;
    log_admin_action(&claims.sub, "delete_registration", Some(&id.to_string()), None);

    Ok(StatusCode::NO_CONTENT)
}
