//! Site settings service implementation

use tracing::info;
use crate::database::repositories::SiteSettingRepository;
use crate::models::site_setting::{SiteSetting, SiteSettings, KNOWN_SETTING_KEYS};
use crate::utils::errors::{PereirinhaError, Result};

/// Site settings service for the public page's key-value content
#[derive(Clone)]
pub struct SiteSettingsService {
    site_setting_repository: SiteSettingRepository,
}

impl SiteSettingsService {
    /// Create a new SiteSettingsService instance
    pub fn new(site_setting_repository: SiteSettingRepository) -> Self {
        Self { site_setting_repository }
    }

    pub async fn get_all(&self) -> Result<SiteSettings> {
        self.site_setting_repository.get_all().await
    }

    /// Update one existing key
    pub async fn update(&self, key: &str, value: &str) -> Result<SiteSetting> {
        ensure_known_key(key)?;
        let setting = self.site_setting_repository.update(key, value.trim()).await?;
        info!(key = %key, "Site setting updated");

        Ok(setting)
    }

    /// Update several keys at once; an unknown key rejects the whole batch
    pub async fn update_many(&self, settings: SiteSettings) -> Result<SiteSettings> {
        settings.keys().try_for_each(|key| ensure_known_key(key))?;

        let settings: SiteSettings = settings
            .into_iter()
            .map(|(key, value)| (key, value.trim().to_string()))
            .collect();

        self.site_setting_repository.update_many(&settings).await?;
        info!(keys = settings.len(), "Site settings updated");

        self.get_all().await
    }
}

/// Reject keys the public page does not read
pub fn ensure_known_key(key: &str) -> Result<()> {
    if KNOWN_SETTING_KEYS.contains(&key) {
        Ok(())
    } else {
        Err(PereirinhaError::SettingNotFound { key: key.to_string() })
    }
}
