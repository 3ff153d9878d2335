//! Announcement management handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;
use crate::handlers::extract::{Json, Path};
use crate::models::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub async fn list_announcements(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(state.services.announcement_service.list_all().await?))
}

pub async fn create_announcement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse> {
    let announcement = state.services.announcement_service.create(request).await?;
    log_admin_action(&claims.sub, "create_announcement", Some(&announcement.id.to_string()), None);

    Ok((StatusCode::CREATED, Json(announcement)))
}

pub async fn update_announcement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAnnouncementRequest>,
) -> Result<Json<Announcement>> {
    let announcement = state.services.announcement_service.update(id, request).await?;
    let details = if announcement.published { "published" } else { "draft" };
    log_admin_action(&claims.sub, "update_announcement", Some(&id.to_string()), Some(details));

    Ok(Json(announcement))
}

pub async fn delete_announcement(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.services.announcement_service.delete(id).await?;
    log_admin_action(&claims.sub, "delete_announcement", Some(&id.to_string()), None);

    Ok(StatusCode::NO_CONTENT)
}
