//! Admin panel handlers
//!
//! Every route here except login runs behind the session token guard and
//! receives the decoded [`Claims`](crate::services::Claims) as an extension.

pub mod announcements;
pub mod auth;
pub mod categories;
pub mod configuration;
pub mod dashboard;
pub mod registrations;
pub mod site_settings;
