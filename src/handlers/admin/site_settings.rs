//! Site settings handlers

use axum::extract::State;
use axum::Extension;
use serde::Deserialize;
use crate::handlers::extract::{Json, Path};
use crate::models::{SiteSetting, SiteSettings};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

#[derive(Debug, Deserialize)]
pub struct SettingValue {
    pub value: String,
}

pub async fn get_site_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.services.site_settings_service.get_all().await?))
}

/// Replace several settings at once
pub async fn update_site_settings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(settings): Json<SiteSettings>,
) -> Result<Json<SiteSettings>> {
    let keys = settings.keys().cloned().collect::<Vec<_>>().join(",");
    let updated = state.services.site_settings_service.update_many(settings).await?;
    log_admin_action(&claims.sub, "update_site_settings", None, Some(&keys));

    Ok(Json(updated))
}

pub async fn update_site_setting(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(key): Path<String>,
    Json(body): Json<SettingValue>,
) -> Result<Json<SiteSetting>> {
    let setting = state.services.site_settings_service.update(&key, &body.value).await?;
    log_admin_action(&claims.sub, "update_site_setting", Some(&key), None);

    Ok(Json(setting))
}
