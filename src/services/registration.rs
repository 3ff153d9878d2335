//! Registration service implementation
//!
//! This service validates public submissions, gates them on current
//! availability and handles the administrative registration workflow.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;
use crate::capacity::AvailabilityStatus;
use crate::config::RegistrationConfig;
use crate::database::repositories::{CategoryRepository, RegistrationRepository};
use crate::models::registration::{NewRegistration, Registration, RegistrationFilter, RegistrationStatus};
use crate::utils::errors::{PereirinhaError, Result};
use crate::utils::helpers::{is_valid_email, is_valid_phone, normalize_whitespace};
use crate::utils::logging;
use super::availability::{AvailabilityService, AvailabilitySnapshot};

/// Registration service for public submissions and admin management
#[derive(Clone)]
pub struct RegistrationService {
    registrations: RegistrationRepository,
    categories: CategoryRepository,
    availability: AvailabilityService,
    settings: RegistrationConfig,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(
        registrations: RegistrationRepository,
        categories: CategoryRepository,
        availability: AvailabilityService,
        settings: RegistrationConfig,
    ) -> Self {
        Self {
            registrations,
            categories,
            availability,
            settings,
        }
    }

    /// Validate and store a public submission.
    ///
    /// Submissions are refused while availability is unknown, after the
    /// deadline and once all slots are taken.
    pub async fn submit(&self, request: NewRegistration) -> Result<Registration> {
        let request = validate_registration(request, Utc::now().date_naive())?;
        debug!(category = %request.category, "Validated registration submission");

        // Gate before touching the database so an outage reads as unknown availability
        check_accepts_submissions(&self.availability.snapshot().await)?;

        if self.categories.find_active_by_name(&request.category).await?.is_none() {
            return Err(PereirinhaError::InvalidInput(format!(
                "Category '{}' is not open for registration",
                request.category
            )));
        }

        let registration = if self.settings.strict_capacity {
            self.registrations
                .create_within_capacity(request, self.availability.policy())
                .await?
                .ok_or(PereirinhaError::NoSlotsAvailable)?
        } else {
            self.registrations.create(request).await?
        };

        logging::log_registration_event(registration.id, "submitted", Some(&registration.category));
        Ok(registration)
    }

    /// List registrations for the admin table
    pub async fn list(&self, filter: &RegistrationFilter) -> Result<Vec<Registration>> {
        debug!(search = ?filter.search, status = ?filter.status, "Listing registrations");
        self.registrations.list(filter).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Registration> {
        self.registrations
            .find_by_id(id)
            .await?
            .ok_or(PereirinhaError::RegistrationNotFound { id })
    }

    /// Move a registration to a new status
    pub async fn set_status(&self, id: Uuid, status: RegistrationStatus) -> Result<Registration> {
        let registration = self.registrations.update_status(id, status).await?;
        logging::log_registration_event(id, "status_changed", Some(status.as_str()));

        Ok(registration)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.registrations.delete(id).await?;
        info!(registration_id = %id, "Registration deleted");

        Ok(())
    }
}

/// Map a snapshot onto the error a submission should fail with, if any
pub fn check_accepts_submissions(snapshot: &AvailabilitySnapshot) -> Result<()> {
    match snapshot {
        AvailabilitySnapshot::Unknown { reason, .. } => {
            warn!(reason = %reason, "Submission refused: availability unknown");
            Err(PereirinhaError::AvailabilityUnknown(reason.clone()))
        }
        AvailabilitySnapshot::Known(report) => match report.status {
            AvailabilityStatus::Open => Ok(()),
            AvailabilityStatus::Expired => Err(PereirinhaError::RegistrationClosed),
            AvailabilityStatus::Full => Err(PereirinhaError::NoSlotsAvailable),
            AvailabilityStatus::Unknown => {
                Err(PereirinhaError::AvailabilityUnknown("availability could not be determined".to_string()))
            }
        },
    }
}

/// Normalize a submission and check every field
pub fn validate_registration(request: NewRegistration, today: NaiveDate) -> Result<NewRegistration> {
    let request = NewRegistration {
        full_name: normalize_whitespace(&request.full_name),
        email: request.email.trim().to_lowercase(),
        birth_date: request.birth_date,
        category: request.category.trim().to_string(),
        guardian_name: normalize_whitespace(&request.guardian_name),
        phone: request.phone.trim().to_string(),
        neighborhood: normalize_whitespace(&request.neighborhood),
    };

    if request.full_name.chars().count() < 3 {
        return Err(PereirinhaError::InvalidInput("Full name must have at least 3 characters".to_string()));
    }

    if !is_valid_email(&request.email) {
        return Err(PereirinhaError::InvalidInput("Email address is not valid".to_string()));
    }

    if request.birth_date > today {
        return Err(PereirinhaError::InvalidInput("Birth date cannot be in the future".to_string()));
    }

    if request.category.is_empty() {
        return Err(PereirinhaError::InvalidInput("Category is required".to_string()));
    }

    if request.guardian_name.chars().count() < 3 {
        return Err(PereirinhaError::InvalidInput("Guardian name must have at least 3 characters".to_string()));
    }

    if !is_valid_phone(&request.phone) {
        return Err(PereirinhaError::InvalidInput(
            "Phone must have at least 10 characters using digits, parentheses, spaces or dashes".to_string(),
        ));
    }

    if request.neighborhood.chars().count() < 2 {
        return Err(PereirinhaError::InvalidInput("Neighborhood must have at least 2 characters".to_string()));
    }

    Ok(request)
}
