//! Postgres-backed capacity store

use async_trait::async_trait;
use crate::capacity::{CapacityStore, CountingPolicy};
use crate::database::{ConfigurationRepository, RegistrationRepository};
use crate::models::{ConfigurationPatch, SlotConfiguration};
use crate::utils::errors::Result;

/// Reads configuration and counts straight from Postgres on every call
#[derive(Debug, Clone)]
pub struct PgCapacityStore {
    configuration: ConfigurationRepository,
    registrations: RegistrationRepository,
}

impl PgCapacityStore {
    pub fn new(configuration: ConfigurationRepository, registrations: RegistrationRepository) -> Self {
        Self {
            configuration,
            registrations,
        }
    }
}

#[async_trait]
impl CapacityStore for PgCapacityStore {
    async fn get_configuration(&self) -> Result<SlotConfiguration> {
        self.configuration.get().await
    }

    async fn count_registrations(&self, policy: CountingPolicy) -> Result<i64> {
        self.registrations.count(policy).await
    }

    async fn update_configuration(&self, patch: ConfigurationPatch) -> Result<SlotConfiguration> {
        self.configuration.update(patch).await
    }
}
