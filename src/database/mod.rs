//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, pool_options, run_migrations, health_check};
pub use repositories::{ConfigurationRepository, RegistrationRepository, CategoryRepository, AnnouncementRepository, SiteSettingRepository};
pub use service::DatabaseService;
pub use store::PgCapacityStore;
