//! Boundary between the evaluator and the data store

use std::sync::Mutex;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::models::{ConfigurationPatch, RegistrationStatus, SlotConfiguration};
use crate::utils::errors::{PereirinhaError, Result};
use super::CountingPolicy;

/// Reads and writes the inputs of the availability computation.
///
/// Every call must hit the backing store; implementations never cache the
/// registration count.
#[async_trait]
pub trait CapacityStore: Send + Sync {
    async fn get_configuration(&self) -> Result<SlotConfiguration>;

    async fn count_registrations(&self, policy: CountingPolicy) -> Result<i64>;

    /// Apply a partial update; omitted fields keep their stored value
    async fn update_configuration(&self, patch: ConfigurationPatch) -> Result<SlotConfiguration>;
}

/// In-process store for tests and local previews
#[derive(Debug)]
pub struct MemoryCapacityStore {
    inner: Mutex<MemoryState>,
}

#[derive(Debug)]
struct MemoryState {
    configuration: SlotConfiguration,
    statuses: Vec<RegistrationStatus>,
    unavailable: bool,
}

impl MemoryCapacityStore {
    pub fn new(total_slots: i32, registration_deadline: Option<DateTime<Utc>>) -> Self {
        Self {
            inner: Mutex::new(MemoryState {
                configuration: SlotConfiguration {
                    id: Uuid::new_v4(),
                    total_slots,
                    registration_deadline,
                    updated_at: Utc::now(),
                },
                statuses: Vec::new(),
                unavailable: false,
            }),
        }
    }

    /// Record `count` registrations with the given status
    pub fn add_registrations(&self, count: usize, status: RegistrationStatus) {
        let mut state = self.lock();
        state.statuses.extend(std::iter::repeat(status).take(count));
    }

    /// Make every subsequent call fail, as if the backend were unreachable
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked mid-update
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(state: &MemoryState) -> Result<()> {
        if state.unavailable {
            return Err(PereirinhaError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

#[async_trait]
impl CapacityStore for MemoryCapacityStore {
    async fn get_configuration(&self) -> Result<SlotConfiguration> {
        let state = self.lock();
        Self::check_available(&state)?;
        Ok(state.configuration.clone())
    }

    async fn count_registrations(&self, policy: CountingPolicy) -> Result<i64> {
        let state = self.lock();
        Self::check_available(&state)?;
        let count = match policy {
            CountingPolicy::AllRegistrations => state.statuses.len(),
            CountingPolicy::ExcludeCancelled => state
                .statuses
                .iter()
                .filter(|status| **status != RegistrationStatus::Cancelled)
                .count(),
        };
        Ok(count as i64)
    }

    async fn update_configuration(&self, patch: ConfigurationPatch) -> Result<SlotConfiguration> {
        let mut state = self.lock();
        Self::check_available(&state)?;

        if patch.is_empty() {
            return Ok(state.configuration.clone());
        }
        if let Some(total_slots) = patch.total_slots {
            state.configuration.total_slots = total_slots;
        }
        if patch.clear_deadline {
            state.configuration.registration_deadline = None;
        } else if let Some(deadline) = patch.registration_deadline {
            state.configuration.registration_deadline = Some(deadline);
        }
        state.configuration.updated_at = Utc::now();

        Ok(state.configuration.clone())
    }
}
