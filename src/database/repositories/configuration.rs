//! Slot configuration repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::configuration::{SlotConfiguration, ConfigurationPatch};
use crate::utils::errors::PereirinhaError;

#[derive(Debug, Clone)]
pub struct ConfigurationRepository {
    pool: PgPool,
}

impl ConfigurationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the singleton configuration record
    pub async fn get(&self) -> Result<SlotConfiguration, PereirinhaError> {
        let configuration = sqlx::query_as::<_, SlotConfiguration>(
            "SELECT id, total_slots, registration_deadline, updated_at FROM slot_configuration LIMIT 1"
        )
        .fetch_optional(&self.pool)
        .await?;

        configuration.ok_or(PereirinhaError::ConfigurationMissing)
    }

    /// Apply a partial update to the singleton record
    pub async fn update(&self, patch: ConfigurationPatch) -> Result<SlotConfiguration, PereirinhaError> {
        if patch.is_empty() {
            return self.get().await;
        }

        let configuration = sqlx::query_as::<_, SlotConfiguration>(
            r#"
            UPDATE slot_configuration
            SET total_slots = COALESCE($1, total_slots),
                registration_deadline = CASE WHEN $3 THEN NULL ELSE COALESCE($2, registration_deadline) END,
                updated_at = $4
            RETURNING id, total_slots, registration_deadline, updated_at
            "#
        )
        .bind(patch.total_slots)
        .bind(patch.registration_deadline)
        .bind(patch.clear_deadline)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        configuration.ok_or(PereirinhaError::ConfigurationMissing)
    }
}
