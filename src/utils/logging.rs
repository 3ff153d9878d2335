//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the Pereirinha service.

use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use uuid::Uuid;
use crate::capacity::AvailabilityStatus;
use crate::config::LoggingConfig;
use crate::services::availability::AvailabilityReport;
use crate::utils::errors::{PereirinhaError, Result};

/// Initialize logging based on configuration.
///
/// When a log directory is configured the returned guard must be held for
/// the lifetime of the process, otherwise buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| PereirinhaError::Config(format!("Invalid log filter: {}", e)))?;

    let stdout_layer = if config.json {
        fmt::layer().json().with_writer(std::io::stdout).boxed()
    } else {
        fmt::layer().with_writer(std::io::stdout).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            let file_appender = tracing_appender::rolling::daily(directory, "pereirinha.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(non_blocking).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| PereirinhaError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log admin actions
pub fn log_admin_action(admin: &str, action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        admin = admin,
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log registration lifecycle events
pub fn log_registration_event(registration_id: Uuid, event: &str, details: Option<&str>) {
    info!(
        registration_id = %registration_id,
        event = event,
        details = details,
        "Registration event occurred"
    );
}

/// Log availability computations
pub fn log_availability_check(report: &AvailabilityReport) {
    match report.status {
        AvailabilityStatus::Open => debug!(
            total_slots = report.total_slots,
            slots_used = report.slots_used,
            slots_available = report.slots_available,
            "Availability check: open"
        ),
        status => info!(
            status = ?status,
            total_slots = report.total_slots,
            slots_used = report.slots_used,
            deadline = ?report.deadline,
            "Availability check: not accepting registrations"
        ),
    }
}

/// Log request timings
pub fn log_request(method: &str, path: &str, status: u16, duration_ms: u64) {
    if status >= 500 {
        warn!(method = method, path = path, status = status, duration_ms = duration_ms, "Request failed");
    } else {
        debug!(method = method, path = path, status = status, duration_ms = duration_ms, "Request completed");
    }
}
