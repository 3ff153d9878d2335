//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod configuration;
pub mod registration;
pub mod category;
pub mod announcement;
pub mod site_setting;

// Re-export commonly used models
pub use configuration::{SlotConfiguration, ConfigurationPatch};
pub use registration::{Registration, RegistrationStatus, NewRegistration, RegistrationFilter, UpdateStatusRequest};
pub use category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
pub use announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest};
pub use site_setting::{SiteSetting, SiteSettings, KNOWN_SETTING_KEYS};
