//! Slot configuration model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Singleton record holding the slot total and the registration deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SlotConfiguration {
    pub id: Uuid,
    pub total_slots: i32,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationPatch {
    pub total_slots: Option<i32>,
    pub registration_deadline: Option<DateTime<Utc>>,
    /// Remove the deadline; takes precedence over `registration_deadline`
    #[serde(default)]
    pub clear_deadline: bool,
}

impl ConfigurationPatch {
    pub fn is_empty(&self) -> bool {
        self.total_slots.is_none() && self.registration_deadline.is_none() && !self.clear_deadline
    }
}
