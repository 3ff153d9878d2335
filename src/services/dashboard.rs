//! Dashboard service implementation

use serde::Serialize;
use crate::capacity::CountingPolicy;
use crate::database::DatabaseService;
use crate::models::Registration;
use crate::utils::errors::Result;
use super::availability::{AvailabilityReport, AvailabilityService};

/// Registrations shown in the dashboard's recent list
pub const RECENT_REGISTRATIONS: i64 = 5;

/// Summary figures for the admin dashboard
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub registrations_total: i64,
    pub availability: AvailabilityReport,
    pub categories_total: i64,
    pub announcements_total: i64,
    pub recent_registrations: Vec<Registration>,
}

#[derive(Clone)]
pub struct DashboardService {
    database: DatabaseService,
    availability: AvailabilityService,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(database: DatabaseService, availability: AvailabilityService) -> Self {
        Self { database, availability }
    }

    /// Collect dashboard figures; all reads run concurrently
    pub async fn stats(&self) -> Result<DashboardStats> {
        let (registrations_total, availability, categories_total, announcements_total, recent_registrations) = tokio::try_join!(
            self.database.registrations.count(CountingPolicy::AllRegistrations),
            self.availability.get_availability(),
            self.database.categories.count(),
            self.database.announcements.count(),
            self.database.registrations.recent(RECENT_REGISTRATIONS),
        )?;

        Ok(DashboardStats {
            registrations_total,
            availability,
            categories_total,
            announcements_total,
            recent_registrations,
        })
    }
}
