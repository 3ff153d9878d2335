//! Site setting model

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Keys seeded by the initial migration and read by the public page
pub const KNOWN_SETTING_KEYS: &[&str] = &["age_range", "schedule", "address", "logo_url"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SiteSetting {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Key-value view handed to the public page
pub type SiteSettings = BTreeMap<String, String>;
