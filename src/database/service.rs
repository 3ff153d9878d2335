//! Database service layer
//!
//! This module bundles the repositories behind one cloneable handle

use crate::database::{DatabasePool, ConfigurationRepository, RegistrationRepository, CategoryRepository, AnnouncementRepository, SiteSettingRepository};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub configuration: ConfigurationRepository,
    pub registrations: RegistrationRepository,
    pub categories: CategoryRepository,
    pub announcements: AnnouncementRepository,
    pub site_settings: SiteSettingRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            configuration: ConfigurationRepository::new(pool.clone()),
            registrations: RegistrationRepository::new(pool.clone()),
            categories: CategoryRepository::new(pool.clone()),
            announcements: AnnouncementRepository::new(pool.clone()),
            site_settings: SiteSettingRepository::new(pool.clone()),
            pool,
        }
    }

    /// Underlying connection pool
    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }
}
