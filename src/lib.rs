//! Pereirinha registration back-office
//!
//! HTTP API behind the sign-up page of a youth sports program. The library
//! computes registration availability from the configured slot total, the
//! deadline and the number of stored registrations, gates public
//! submissions on it, and serves the admin panel that manages slots,
//! registrations, categories, announcements and page settings.

pub mod capacity;
pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PereirinhaError, Result};

// Re-export main components for easy access
pub use capacity::{compute_availability, validate_capacity_reduction, Availability, AvailabilityStatus};
pub use database::DatabaseService;
pub use services::ServiceFactory;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
