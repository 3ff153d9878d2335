//! Services module
//!
//! This module contains business logic services

pub mod announcement;
pub mod auth;
pub mod availability;
pub mod availability_poller;
pub mod category;
pub mod dashboard;
pub mod registration;
pub mod site_settings;

// Re-export commonly used services
pub use announcement::AnnouncementService;
pub use auth::{AuthService, Claims, LoginRequest, LoginResponse};
pub use availability::{AvailabilityReport, AvailabilityService, AvailabilitySnapshot};
pub use availability_poller::AvailabilityPoller;
pub use category::CategoryService;
pub use dashboard::{DashboardService, DashboardStats};
pub use registration::RegistrationService;
pub use site_settings::SiteSettingsService;

use std::sync::Arc;
use serde::Serialize;
use crate::capacity::CapacityStore;
use crate::config::Settings;
use crate::database::{self, DatabaseService, PgCapacityStore};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub availability_service: AvailabilityService,
    pub registration_service: RegistrationService,
    pub category_service: CategoryService,
    pub announcement_service: AnnouncementService,
    pub site_settings_service: SiteSettingsService,
    pub dashboard_service: DashboardService,
    pub auth_service: AuthService,
    database: DatabaseService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services backed by the database
    pub fn new(settings: &Settings, database: DatabaseService) -> Self {
        let store = PgCapacityStore::new(database.configuration.clone(), database.registrations.clone());
        Self::with_capacity_store(settings, database, Arc::new(store))
    }

    /// Create a ServiceFactory whose availability reads go through `store`
    pub fn with_capacity_store(settings: &Settings, database: DatabaseService, store: Arc<dyn CapacityStore>) -> Self {
        let availability_service = AvailabilityService::new(store, settings.registration.counting_policy);
        let registration_service = RegistrationService::new(
            database.registrations.clone(),
            database.categories.clone(),
            availability_service.clone(),
            settings.registration.clone(),
        );
        let category_service = CategoryService::new(database.categories.clone());
        let announcement_service = AnnouncementService::new(database.announcements.clone());
        let site_settings_service = SiteSettingsService::new(database.site_settings.clone());
        let dashboard_service = DashboardService::new(database.clone(), availability_service.clone());
        let auth_service = AuthService::new(settings.auth.clone());

        Self {
            availability_service,
            registration_service,
            category_service,
            announcement_service,
            site_settings_service,
            dashboard_service,
            auth_service,
            database,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let database_healthy = database::health_check(self.database.pool()).await.is_ok();
        let availability_known = self.availability_service.get_availability().await.is_ok();

        ServiceHealthStatus {
            database_healthy,
            availability_known,
        }
    }
}

/// Health status for all services
#[derive(Debug, Clone, Serialize)]
pub struct ServiceHealthStatus {
    pub database_healthy: bool,
    pub availability_known: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.database_healthy && self.availability_known
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.database_healthy {
            issues.push("Database connection failed".to_string());
        }
        if !self.availability_known {
            issues.push("Availability could not be determined".to_string());
        }

        issues
    }
}
