//! Capacity & deadline evaluator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Slots at or below this count are shown as critical
pub const CRITICAL_SLOTS: i64 = 3;
/// Slots at or below this count are shown as running low
pub const LOW_SLOTS: i64 = 10;

/// Derived availability triple shown to the public form and the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub slots_available: i64,
    pub is_expired: bool,
    pub is_open: bool,
}

/// Three-way classification of [`Availability`], plus the unknown state
/// callers fall back to when the inputs could not be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Open,
    Expired,
    Full,
    Unknown,
}

/// Which registrations reserve a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountingPolicy {
    /// Every submitted registration holds a slot, whatever its status
    #[default]
    AllRegistrations,
    /// Cancelled registrations give their slot back
    ExcludeCancelled,
}

/// Urgency bucket for the remaining slot count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotLevel {
    Critical,
    Low,
    Plenty,
}

/// Countdown until the registration deadline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Compute availability from the three stored inputs and the current time.
///
/// Negative counts are clamped to zero. A deadline equal to `now` is still
/// open: the registration window is `[start, deadline]`.
pub fn compute_availability(
    total_slots: i64,
    registrations_count: i64,
    deadline: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Availability {
    let total = total_slots.max(0);
    let used = registrations_count.max(0);

    let slots_available = (total - used).max(0);
    let is_expired = deadline.is_some_and(|deadline| deadline < now);
    let is_open = !is_expired && slots_available > 0;

    Availability {
        slots_available,
        is_expired,
        is_open,
    }
}

/// Whether the slot total may be set to `proposed_total` given current usage
pub fn validate_capacity_reduction(proposed_total: i64, registrations_count: i64) -> bool {
    proposed_total >= registrations_count
}

impl Availability {
    /// Classify this availability. An expired deadline wins over a full roster.
    pub fn status(&self) -> AvailabilityStatus {
        if self.is_expired {
            AvailabilityStatus::Expired
        } else if self.slots_available == 0 {
            AvailabilityStatus::Full
        } else {
            AvailabilityStatus::Open
        }
    }

    pub fn level(&self) -> SlotLevel {
        SlotLevel::from_available(self.slots_available)
    }
}

impl SlotLevel {
    pub fn from_available(slots_available: i64) -> Self {
        if slots_available <= CRITICAL_SLOTS {
            SlotLevel::Critical
        } else if slots_available <= LOW_SLOTS {
            SlotLevel::Low
        } else {
            SlotLevel::Plenty
        }
    }
}

impl TimeLeft {
    pub fn is_zero(&self) -> bool {
        *self == TimeLeft::default()
    }
}

/// Time remaining until `deadline`, all zero once it has passed
pub fn time_left(deadline: DateTime<Utc>, now: DateTime<Utc>) -> TimeLeft {
    let remaining = (deadline - now).num_seconds();
    if remaining <= 0 {
        return TimeLeft::default();
    }

    TimeLeft {
        days: remaining / 86_400,
        hours: (remaining / 3_600) % 24,
        minutes: (remaining / 60) % 60,
        seconds: remaining % 60,
    }
}

/// Share of slots already taken, in percent, clamped to `[0, 100]`
pub fn fill_percentage(total_slots: i64, slots_used: i64) -> f64 {
    if total_slots <= 0 {
        return 0.0;
    }

    let percentage = slots_used.max(0) as f64 / total_slots as f64 * 100.0;
    percentage.min(100.0)
}
