//! Public API handlers
//!
//! Endpoints read by the registration page: the live slot counter, the
//! form's category list, the notice board and the page settings.

use std::convert::Infallible;
use std::time::Duration;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures::Stream;
use tracing::debug;
use crate::handlers::extract::Json;
use crate::models::{Announcement, Category, NewRegistration, SiteSettings};
use crate::services::AvailabilitySnapshot;
use crate::state::AppState;
use crate::utils::errors::Result;

const AVAILABILITY_EVENT: &str = "availability";

/// Current availability, computed from fresh reads.
///
/// Responds 503 with the `unknown` snapshot when it cannot be computed, so
/// the page can disable the form without announcing that registrations
/// are closed.
pub async fn get_availability(State(state): State<AppState>) -> Response {
    let snapshot = state.services.availability_service.snapshot().await;
    let status = match snapshot {
        AvailabilitySnapshot::Known(_) => StatusCode::OK,
        AvailabilitySnapshot::Unknown { .. } => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status, Json(snapshot)).into_response()
}

/// Server-sent events carrying every snapshot the poller publishes
pub async fn stream_availability(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut updates = state.availability.clone();
    debug!("Availability stream opened");

    let stream = async_stream::stream! {
        loop {
            let event = availability_event(&updates.borrow_and_update());
            yield Ok(event);

            if updates.changed().await.is_err() {
                break;
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}

fn availability_event(snapshot: &AvailabilitySnapshot) -> Event {
    Event::default()
        .event(AVAILABILITY_EVENT)
        .json_data(snapshot)
        .unwrap_or_else(|_| Event::default().event(AVAILABILITY_EVENT).data(r#"{"status":"unknown"}"#))
}

/// Active categories for the form's select box
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    Ok(Json(state.services.category_service.list_active().await?))
}

pub async fn list_announcements(State(state): State<AppState>) -> Result<Json<Vec<Announcement>>> {
    Ok(Json(state.services.announcement_service.list_published().await?))
}

pub async fn get_site_settings(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    Ok(Json(state.services.site_settings_service.get_all().await?))
}

/// Submit a registration from the public form
pub async fn submit_registration(
    State(state): State<AppState>,
    Json(request): Json<NewRegistration>,
) -> Result<impl IntoResponse> {
    let registration = state.services.registration_service.submit(request).await?;
    Ok((StatusCode::CREATED, Json(registration)))
}
