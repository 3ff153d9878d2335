//! Slot configuration handlers

use axum::extract::State;
use axum::Extension;
use serde::{Deserialize, Serialize};
use crate::handlers::extract::{Json, Query};
use crate::models::{ConfigurationPatch, SlotConfiguration};
use crate::services::Claims;
use crate::state::AppState;
use crate::utils::errors::Result;
use crate::utils::logging::log_admin_action;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateParams {
    /// Apply a slot total below current usage anyway
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize)]
pub struct CapacityCheckParams {
    pub total: i64,
}

#[derive(Debug, Serialize)]
pub struct CapacityCheck {
    pub proposed_total: i64,
    pub allowed: bool,
}

pub async fn get_configuration(State(state): State<AppState>) -> Result<Json<SlotConfiguration>> {
    Ok(Json(state.services.availability_service.get_configuration().await?))
}

pub async fn update_configuration(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<UpdateParams>,
    Json(patch): Json<ConfigurationPatch>,
) -> Result<Json<SlotConfiguration>> {
    let configuration = state
        .services
        .availability_service
        .update_configuration(patch, params.force)
        .await?;

    let details = format!(
        "total_slots={} deadline={:?} force={}",
        configuration.total_slots, configuration.registration_deadline, params.force
    );
    log_admin_action(&claims.sub, "update_configuration", None, Some(&details));

    Ok(Json(configuration))
}

/// Whether a proposed slot total would still cover current registrations
pub async fn check_capacity(
    State(state): State<AppState>,
    Query(params): Query<CapacityCheckParams>,
) -> Result<Json<CapacityCheck>> {
    let allowed = state.services.availability_service.can_reduce_capacity(params.total).await?;

    Ok(Json(CapacityCheck {
        proposed_total: params.total,
        allowed,
    }))
}
