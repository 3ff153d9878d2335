//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod configuration;
pub mod registration;
pub mod category;
pub mod announcement;
pub mod site_setting;

// Re-export repositories
pub use configuration::ConfigurationRepository;
pub use registration::RegistrationRepository;
pub use category::CategoryRepository;
pub use announcement::AnnouncementRepository;
pub use site_setting::SiteSettingRepository;
