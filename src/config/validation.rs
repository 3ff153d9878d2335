//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{PereirinhaError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_auth_config(&settings.auth)?;
    validate_registration_config(&settings.registration)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(PereirinhaError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(PereirinhaError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(PereirinhaError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(PereirinhaError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(PereirinhaError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_seconds == 0
        || config.idle_timeout_seconds == Some(0)
        || config.max_lifetime_seconds == Some(0)
    {
        return Err(PereirinhaError::Config(
            "Database timeouts must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate admin authentication configuration
fn validate_auth_config(config: &super::AuthConfig) -> Result<()> {
    if config.admin_email.is_empty() {
        return Err(PereirinhaError::Config(
            "Admin email is required".to_string()
        ));
    }

    if !config.admin_password_hash.starts_with("$2") {
        return Err(PereirinhaError::Config(
            "Admin password hash must be a bcrypt hash".to_string()
        ));
    }

    if config.jwt_secret.len() < 32 {
        return Err(PereirinhaError::Config(
            "JWT secret must be at least 32 characters".to_string()
        ));
    }

    if config.token_ttl_minutes <= 0 {
        return Err(PereirinhaError::Config(
            "Token TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate registration configuration
fn validate_registration_config(config: &super::RegistrationConfig) -> Result<()> {
    if config.refresh_interval_seconds == 0 {
        return Err(PereirinhaError::Config(
            "Availability refresh interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitConfig) -> Result<()> {
    if config.enabled && config.submissions_per_minute == 0 {
        return Err(PereirinhaError::Config(
            "Submissions per minute must be greater than 0 when rate limiting is enabled".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PereirinhaError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PereirinhaError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
