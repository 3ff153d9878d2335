//! Category management handlers

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;
use crate::handlers::extract::{Json, Path};
use crate::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.services.category_service.list_all().await?))
}

pub async fn create_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<impl IntoResponse> {
    let category = state.services.category_service.create(request).await?;
    log_admin_action(&claims.sub, "create_category", Some(&category.id.to_string()), Some(&category.name));

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<Category>> {
    let category = state.services.category_service.update(id, request).await?;
    log_admin_action(&claims.sub, "update_category", Some(&id.to_string()), Some(&category.name));

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    state.services.category_service.delete(id).await?;
    log_admin_action(&claims.sub, "delete_category", Some(&id.to_string()), None);

    Ok(StatusCode::NO_CONTENT)
}
