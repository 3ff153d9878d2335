//! HTTP handlers module
//!
//! This module contains the API handlers organized by audience:
//! - Public handlers behind the registration page
//! - Admin handlers behind a session token
//! - Health check

pub mod admin;
pub mod extract;
pub mod health;
pub mod public;

use axum::http::HeaderValue;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use crate::middleware::{limit_submissions, log_requests, require_admin};
use crate::state::AppState;

/// Build the application router
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.settings.server.cors_origin.as_deref());

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", public_routes(state.clone()))
        .nest("/admin", admin_routes(state.clone()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(log_requests))
                .layer(cors),
        )
        .with_state(state)
}

fn public_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/availability", get(public::get_availability))
        .route("/availability/stream", get(public::stream_availability))
        .route("/categories", get(public::list_categories))
        .route("/announcements", get(public::list_announcements))
        .route("/site-settings", get(public::get_site_settings))
        .route(
            "/registrations",
            post(public::submit_registration).route_layer(from_fn_with_state(state, limit_submissions)),
        )
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(admin::auth::logout))
        .route("/dashboard", get(admin::dashboard::get_dashboard))
        // Slot configuration
        .route(
            "/configuration",
            get(admin::configuration::get_configuration).patch(admin::configuration::update_configuration),
        )
        .route("/configuration/capacity-check", get(admin::configuration::check_capacity))
        // Registrations
        .route("/registrations", get(admin::registrations::list_registrations))
        .route(
            "/registrations/:id",
            get(admin::registrations::get_registration).delete(admin::registrations::delete_registration),
        )
        .route("/registrations/:id/status", axum::routing::patch(admin::registrations::update_status))
        // Categories
        .route(
            "/categories",
            get(admin::categories::list_categories).post(admin::categories::create_category),
        )
        .route(
            "/categories/:id",
            put(admin::categories::update_category).delete(admin::categories::delete_category),
        )
        // Announcements
        .route(
            "/announcements",
            get(admin::announcements::list_announcements).post(admin::announcements::create_announcement),
        )
        .route(
            "/announcements/:id",
            put(admin::announcements::update_announcement).delete(admin::announcements::delete_announcement),
        )
        // Site settings
        .route(
            "/site-settings",
            get(admin::site_settings::get_site_settings).put(admin::site_settings::update_site_settings),
        )
        .route("/site-settings/:key", put(admin::site_settings::update_site_setting))
        .route_layer(from_fn_with_state(state, require_admin))
        // Login stays outside the guard
        .route("/login", post(admin::auth::login))
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    match origin {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(origin) => CorsLayer::new().allow_origin(origin).allow_methods(Any).allow_headers(Any),
            Err(_) => {
                warn!(origin = %origin, "Invalid CORS origin, cross-origin requests disabled");
                CorsLayer::new()
            }
        },
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    }
}
