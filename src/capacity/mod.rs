//! Registration capacity and deadline model
//!
//! Availability is a pure function of the configured slot total, the
//! registration deadline and a freshly counted number of registrations.
//! Nothing in this module performs I/O or keeps state between calls; the
//! [`CapacityStore`] trait is the boundary through which callers fetch the
//! inputs.

pub mod evaluator;
pub mod store;

pub use evaluator::{
    compute_availability, fill_percentage, time_left, validate_capacity_reduction, Availability,
    AvailabilityStatus, CountingPolicy, SlotLevel, TimeLeft,
};
pub use store::CapacityStore;
