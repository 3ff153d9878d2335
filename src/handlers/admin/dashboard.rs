//! Admin dashboard handler

use axum::extract::State;
use crate::handlers::extract::Json;
use crate::services::DashboardStats;
use crate::state::AppState;
use crate::utils::errors::Result;

pub async fn get_dashboard(State(state): State<AppState>) -> Result<Json<DashboardStats>> {
    Ok(Json(state.services.dashboard_service.stats().await?))
}
