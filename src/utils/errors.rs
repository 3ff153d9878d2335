//! Error handling for Pereirinha
//!
//! This module defines the main error type used throughout the application
//! and maps it onto HTTP responses for the API layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for the Pereirinha application
#[derive(Error, Debug)]
pub enum PereirinhaError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registration configuration record is missing")]
    ConfigurationMissing,

    #[error("Registration not found: {id}")]
    RegistrationNotFound { id: Uuid },

    #[error("Category not found: {id}")]
    CategoryNotFound { id: Uuid },

    #[error("Announcement not found: {id}")]
    AnnouncementNotFound { id: Uuid },

    #[error("Site setting not found: {key}")]
    SettingNotFound { key: String },

    #[error("Total slots cannot be {proposed}: {used} registrations already exist")]
    CapacityBelowUsage { proposed: i64, used: i64 },

    #[error("Registrations are closed")]
    RegistrationClosed,

    #[error("No slots available")]
    NoSlotsAvailable,

    #[error("Availability is unknown: {0}")]
    AvailabilityUnknown(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed request: {0}")]
    BadRequest(String),
}

/// Result type alias for Pereirinha operations
pub type Result<T> = std::result::Result<T, PereirinhaError>;

impl PereirinhaError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PereirinhaError::Database(_) => ErrorSeverity::Critical,
            PereirinhaError::Migration(_) => ErrorSeverity::Critical,
            PereirinhaError::Config(_) => ErrorSeverity::Critical,
            PereirinhaError::ConfigurationMissing => ErrorSeverity::Critical,
            PereirinhaError::Authentication(_) => ErrorSeverity::Warning,
            PereirinhaError::Token(_) => ErrorSeverity::Warning,
            PereirinhaError::RateLimitExceeded => ErrorSeverity::Warning,
            PereirinhaError::AvailabilityUnknown(_) => ErrorSeverity::Warning,
            PereirinhaError::InvalidInput(_)
            | PereirinhaError::BadRequest(_)
            | PereirinhaError::CapacityBelowUsage { .. }
            | PereirinhaError::RegistrationClosed
            | PereirinhaError::NoSlotsAvailable => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// HTTP status code for the API layer
    pub fn status_code(&self) -> StatusCode {
        match self {
            PereirinhaError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PereirinhaError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PereirinhaError::RegistrationNotFound { .. }
            | PereirinhaError::CategoryNotFound { .. }
            | PereirinhaError::AnnouncementNotFound { .. }
            | PereirinhaError::SettingNotFound { .. } => StatusCode::NOT_FOUND,
            PereirinhaError::CapacityBelowUsage { .. }
            | PereirinhaError::RegistrationClosed
            | PereirinhaError::NoSlotsAvailable => StatusCode::CONFLICT,
            PereirinhaError::AvailabilityUnknown(_) => StatusCode::SERVICE_UNAVAILABLE,
            PereirinhaError::Authentication(_) | PereirinhaError::Token(_) => StatusCode::UNAUTHORIZED,
            PereirinhaError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            PereirinhaError::InvalidInput(_) => "invalid_input",
            PereirinhaError::BadRequest(_) => "bad_request",
            PereirinhaError::RegistrationNotFound { .. }
            | PereirinhaError::CategoryNotFound { .. }
            | PereirinhaError::AnnouncementNotFound { .. }
            | PereirinhaError::SettingNotFound { .. } => "not_found",
            PereirinhaError::CapacityBelowUsage { .. } => "capacity_below_usage",
            PereirinhaError::RegistrationClosed => "registration_closed",
            PereirinhaError::NoSlotsAvailable => "no_slots_available",
            PereirinhaError::AvailabilityUnknown(_) => "availability_unknown",
            PereirinhaError::Authentication(_) | PereirinhaError::Token(_) => "unauthorized",
            PereirinhaError::RateLimitExceeded => "rate_limited",
            _ => "internal_error",
        }
    }
}

impl IntoResponse for PereirinhaError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Internal details stay in the logs
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, "Request rejected");
            self.to_string()
        };

        let body = serde_json::json!({
            "error": self.code(),
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(PereirinhaError::InvalidInput("x".into()).status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(PereirinhaError::NoSlotsAvailable.status_code(), StatusCode::CONFLICT);
        assert_eq!(PereirinhaError::RegistrationClosed.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            PereirinhaError::CapacityBelowUsage { proposed: 25, used: 27 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            PereirinhaError::AvailabilityUnknown("down".into()).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(PereirinhaError::RateLimitExceeded.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(PereirinhaError::BadRequest("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(PereirinhaError::ConfigurationMissing.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_capacity_message_names_both_numbers() {
        let err = PereirinhaError::CapacityBelowUsage { proposed: 25, used: 27 };
        let message = err.to_string();
        assert!(message.contains("25"));
        assert!(message.contains("27"));
    }

    #[test]
    fn test_severity() {
        assert_eq!(PereirinhaError::Config("bad".into()).severity(), ErrorSeverity::Critical);
        assert_eq!(PereirinhaError::NoSlotsAvailable.severity(), ErrorSeverity::Info);
        assert_eq!(ErrorSeverity::Warning.to_string(), "WARN");
    }
}
