//! Site setting repository implementation

use sqlx::PgPool;
use chrono::Utc;
use crate::models::site_setting::{SiteSetting, SiteSettings};
use crate::utils::errors::PereirinhaError;

#[derive(Debug, Clone)]
pub struct SiteSettingRepository {
    pool: PgPool,
}

impl SiteSettingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All settings as a key-value map
    pub async fn get_all(&self) -> Result<SiteSettings, PereirinhaError> {
        let rows = sqlx::query_as::<_, SiteSetting>(
            "SELECT key, value, updated_at FROM site_settings ORDER BY key ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|row| (row.key, row.value)).collect())
    }

    /// Update a single existing setting
    pub async fn update(&self, key: &str, value: &str) -> Result<SiteSetting, PereirinhaError> {
        let setting = sqlx::query_as::<_, SiteSetting>(
            r#"
            UPDATE site_settings
            SET value = $2, updated_at = $3
            WHERE key = $1
            RETURNING key, value, updated_at
            "#
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        setting.ok_or_else(|| PereirinhaError::SettingNotFound { key: key.to_string() })
    }

    /// Update several settings atomically; an unknown key rolls back all of them
    pub async fn update_many(&self, settings: &SiteSettings) -> Result<(), PereirinhaError> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now();

        for (key, value) in settings {
            let result = sqlx::query("UPDATE site_settings SET value = $2, updated_at = $3 WHERE key = $1")
                .bind(key)
                .bind(value)
                .bind(now)
                .execute(&mut *tx)
                .await?;

            if result.rows_affected() == 0 {
                return Err(PereirinhaError::SettingNotFound { key: key.clone() });
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
