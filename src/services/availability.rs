//! Availability service implementation
//!
//! Composes the two fresh reads (configuration and registration count) with
//! the pure evaluator, and guards administrative changes to the slot total.

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use crate::capacity::{
    compute_availability, fill_percentage, time_left, validate_capacity_reduction, AvailabilityStatus,
    CapacityStore, CountingPolicy, SlotLevel, TimeLeft,
};
use crate::models::{ConfigurationPatch, SlotConfiguration};
use crate::utils::errors::{PereirinhaError, Result};
use crate::utils::logging;

/// Bounds accepted for the slot total
pub const MIN_TOTAL_SLOTS: i32 = 1;
pub const MAX_TOTAL_SLOTS: i32 = 999;

/// Availability plus the figures the public counter and dashboard display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityReport {
    pub status: AvailabilityStatus,
    pub total_slots: i64,
    pub slots_used: i64,
    pub slots_available: i64,
    pub is_expired: bool,
    pub is_open: bool,
    pub level: SlotLevel,
    pub fill_percentage: f64,
    pub deadline: Option<DateTime<Utc>>,
    pub time_left: Option<TimeLeft>,
    pub checked_at: DateTime<Utc>,
}

/// Result of an availability read that never fails.
///
/// `Unknown` is distinct from expired and full: callers must disable
/// submission without claiming registrations are closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AvailabilitySnapshot {
    Known(AvailabilityReport),
    Unknown {
        status: AvailabilityStatus,
        reason: String,
        checked_at: DateTime<Utc>,
    },
}

impl AvailabilitySnapshot {
    pub fn status(&self) -> AvailabilityStatus {
        match self {
            AvailabilitySnapshot::Known(report) => report.status,
            AvailabilitySnapshot::Unknown { .. } => AvailabilityStatus::Unknown,
        }
    }

    /// Whether the public form may accept a submission
    pub fn accepts_submissions(&self) -> bool {
        self.status() == AvailabilityStatus::Open
    }

    pub fn report(&self) -> Option<&AvailabilityReport> {
        match self {
            AvailabilitySnapshot::Known(report) => Some(report),
            AvailabilitySnapshot::Unknown { .. } => None,
        }
    }
}

/// Availability service, shared by the public form and the admin dashboard
#[derive(Clone)]
pub struct AvailabilityService {
    store: Arc<dyn CapacityStore>,
    policy: CountingPolicy,
}

impl AvailabilityService {
    /// Create a new AvailabilityService instance
    pub fn new(store: Arc<dyn CapacityStore>, policy: CountingPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> CountingPolicy {
        self.policy
    }

    /// Current availability, read fresh from the store
    pub async fn get_availability(&self) -> Result<AvailabilityReport> {
        self.availability_at(Utc::now()).await
    }

    /// Availability as of `now`
    pub async fn availability_at(&self, now: DateTime<Utc>) -> Result<AvailabilityReport> {
        let (configuration, slots_used) = tokio::try_join!(
            self.store.get_configuration(),
            self.store.count_registrations(self.policy),
        )?;

        let total_slots = i64::from(configuration.total_slots);
        let deadline = configuration.registration_deadline;
        let availability = compute_availability(total_slots, slots_used, deadline, now);

        let report = AvailabilityReport {
            status: availability.status(),
            total_slots,
            slots_used,
            slots_available: availability.slots_available,
            is_expired: availability.is_expired,
            is_open: availability.is_open,
            level: availability.level(),
            fill_percentage: fill_percentage(total_slots, slots_used),
            deadline,
            time_left: deadline.map(|deadline| time_left(deadline, now)),
            checked_at: now,
        };

        logging::log_availability_check(&report);
        Ok(report)
    }

    /// Availability that degrades to `Unknown` when a read fails
    pub async fn snapshot(&self) -> AvailabilitySnapshot {
        self.snapshot_at(Utc::now()).await
    }

    pub async fn snapshot_at(&self, now: DateTime<Utc>) -> AvailabilitySnapshot {
        match self.availability_at(now).await {
            Ok(report) => AvailabilitySnapshot::Known(report),
            Err(e) => {
                warn!(error = %e, "Availability could not be determined");
                AvailabilitySnapshot::Unknown {
                    status: AvailabilityStatus::Unknown,
                    reason: e.to_string(),
                    checked_at: now,
                }
            }
        }
    }

    /// Whether the slot total may be set to `proposed_total`
    pub async fn can_reduce_capacity(&self, proposed_total: i64) -> Result<bool> {
        let used = self.store.count_registrations(self.policy).await?;
        let allowed = validate_capacity_reduction(proposed_total, used);

        debug!(proposed_total = proposed_total, used = used, allowed = allowed, "Capacity check");
        Ok(allowed)
    }

    pub async fn get_configuration(&self) -> Result<SlotConfiguration> {
        self.store.get_configuration().await
    }

    /// Apply a configuration patch.
    ///
    /// Lowering the total below current usage is rejected unless `force` is
    /// set, in which case the write goes through with a warning.
    pub async fn update_configuration(&self, patch: ConfigurationPatch, force: bool) -> Result<SlotConfiguration> {
        if let Some(total_slots) = patch.total_slots {
            if !(MIN_TOTAL_SLOTS..=MAX_TOTAL_SLOTS).contains(&total_slots) {
                return Err(PereirinhaError::InvalidInput(format!(
                    "Total slots must be between {} and {}",
                    MIN_TOTAL_SLOTS, MAX_TOTAL_SLOTS
                )));
            }

            let used = self.store.count_registrations(self.policy).await?;
            if !validate_capacity_reduction(i64::from(total_slots), used) {
                if !force {
                    return Err(PereirinhaError::CapacityBelowUsage {
                        proposed: i64::from(total_slots),
                        used,
                    });
                }
                warn!(proposed = total_slots, used = used, "Slot total forced below current usage");
            }
        }

        let configuration = self.store.update_configuration(patch).await?;
        info!(
            total_slots = configuration.total_slots,
            deadline = ?configuration.registration_deadline,
            "Slot configuration updated"
        );

        Ok(configuration)
    }
}
