//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from configuration files and environment variables.

use serde::{Deserialize, Serialize};
use crate::capacity::CountingPolicy;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub registration: RegistrationConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_seconds: u64,
    /// Close connections idle for longer than this; unset keeps them open
    pub idle_timeout_seconds: Option<u64>,
    /// Recycle connections older than this; unset never recycles
    pub max_lifetime_seconds: Option<u64>,
}

/// Admin authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub admin_email: String,
    /// bcrypt hash of the admin password
    pub admin_password_hash: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

/// Registration capacity behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegistrationConfig {
    pub counting_policy: CountingPolicy,
    /// Serialize inserts against the configuration row so capacity is never exceeded
    pub strict_capacity: bool,
    pub refresh_interval_seconds: u64,
}

/// Public submission rate limiting
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub submissions_per_minute: u32,
    pub burst: u32,
    /// Key clients by the first X-Forwarded-For address (behind a reverse proxy)
    pub trust_forwarded_for: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: Option<String>,
    pub json: bool,
}

impl Settings {
    /// Load settings from `config.*` in the working directory and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load("config")
    }

    /// Load settings from the given file (extension optional) layered over
    /// the defaults, with `PEREIRINHA__SECTION__KEY` variables on top
    pub fn load(config_file: &str) -> Result<Self, config::ConfigError> {
        let defaults = config::Config::try_from(&Settings::default())?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(
                config::Environment::with_prefix("PEREIRINHA")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PereirinhaError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                cors_origin: None,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/pereirinha".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_seconds: 30,
                idle_timeout_seconds: Some(600),
                max_lifetime_seconds: Some(1800),
            },
            auth: AuthConfig {
                admin_email: String::new(),
                admin_password_hash: String::new(),
                jwt_secret: String::new(),
                token_ttl_minutes: 480,
            },
            registration: RegistrationConfig {
                counting_policy: CountingPolicy::AllRegistrations,
                strict_capacity: false,
                refresh_interval_seconds: 10,
            },
            rate_limit: RateLimitConfig {
                enabled: true,
                submissions_per_minute: 5,
                burst: 3,
                trust_forwarded_for: false,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                directory: None,
                json: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = Settings::load("/nonexistent/pereirinha").unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.registration.refresh_interval_seconds, 10);
        assert_eq!(settings.registration.counting_policy, CountingPolicy::AllRegistrations);
    }

    #[test]
    #[serial]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pereirinha.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[server]
port = 9000

[registration]
counting_policy = "exclude_cancelled"
strict_capacity = true
"#
        )
        .unwrap();

        let settings = Settings::load(path.to_str().unwrap()).unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.registration.counting_policy, CountingPolicy::ExcludeCancelled);
        assert!(settings.registration.strict_capacity);
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        std::env::set_var("PEREIRINHA__SERVER__PORT", "9100");
        std::env::set_var("PEREIRINHA__AUTH__ADMIN_EMAIL", "admin@example.com");
        std::env::set_var("PEREIRINHA__DATABASE__MAX_LIFETIME_SECONDS", "900");
        let settings = Settings::load("/nonexistent/pereirinha");
        std::env::remove_var("PEREIRINHA__SERVER__PORT");
        std::env::remove_var("PEREIRINHA__AUTH__ADMIN_EMAIL");
        std::env::remove_var("PEREIRINHA__DATABASE__MAX_LIFETIME_SECONDS");

        let settings = settings.unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.auth.admin_email, "admin@example.com");
        assert_eq!(settings.database.max_lifetime_seconds, Some(900));
        assert_eq!(settings.database.idle_timeout_seconds, Some(600));
    }

    #[test]
    fn test_bind_address() {
        assert_eq!(Settings::default().bind_address(), "0.0.0.0:8080");
    }
}
