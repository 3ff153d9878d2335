//! Registration submission flow against PostgreSQL

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use serial_test::serial;
use helpers::*;
use pereirinha::capacity::{AvailabilityStatus, CountingPolicy};
use pereirinha::models::{ConfigurationPatch, RegistrationStatus};
use pereirinha::services::ServiceFactory;
use pereirinha::PereirinhaError;

async fn setup(configure: impl FnOnce(&mut pereirinha::Settings)) -> (TestDatabase, ServiceFactory) {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.create_category("Sub-11").await;

    let mut settings = test_settings();
    configure(&mut settings);
    let services = ServiceFactory::new(&settings, db.service());

    (db, services)
}

#[tokio::test]
#[serial]
async fn test_submission_takes_a_slot() {
    let (_db, services) = setup(|_| {}).await;
    let before = services.availability_service.get_availability().await.unwrap();

    let registration = services
        .registration_service
        .submit(registration_request("Sub-11"))
        .await
        .unwrap();
    assert_eq!(registration.status, RegistrationStatus::Pending);

    let after = services.availability_service.get_availability().await.unwrap();
    assert_eq!(after.slots_available, before.slots_available - 1);
    assert_eq!(after.slots_used, 1);
}

#[tokio::test]
#[serial]
async fn test_inactive_category_rejected() {
    let (_db, services) = setup(|_| {}).await;

    assert_matches!(
        services.registration_service.submit(registration_request("Sub-17")).await,
        Err(PereirinhaError::InvalidInput(_))
    );
}

#[tokio::test]
#[serial]
async fn test_full_program_rejects_submission() {
    let (db, services) = setup(|_| {}).await;
    db.set_total_slots(2).await.unwrap();
    db.insert_registrations(2, RegistrationStatus::Pending).await;

    assert_matches!(
        services.registration_service.submit(registration_request("Sub-11")).await,
        Err(PereirinhaError::NoSlotsAvailable)
    );
    assert_eq!(db.count_records("registrations").await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_past_deadline_rejects_submission() {
    let (db, services) = setup(|_| {}).await;
    db.set_deadline(Some(Utc::now() - Duration::minutes(5))).await.unwrap();

    assert_matches!(
        services.registration_service.submit(registration_request("Sub-11")).await,
        Err(PereirinhaError::RegistrationClosed)
    );

    let report = services.availability_service.get_availability().await.unwrap();
    assert_eq!(report.status, AvailabilityStatus::Expired);
    assert_eq!(report.slots_available, 30);
}

#[tokio::test]
#[serial]
async fn test_cancelled_registrations_free_slots_when_configured() {
    let (db, services) = setup(|settings| {
        settings.registration.counting_policy = CountingPolicy::ExcludeCancelled;
    })
    .await;
    db.set_total_slots(2).await.unwrap();
    db.insert_registrations(1, RegistrationStatus::Confirmed).await;
    db.insert_registrations(1, RegistrationStatus::Cancelled).await;

    let registration = services.registration_service.submit(registration_request("Sub-11")).await;
    assert!(registration.is_ok());

    let report = services.availability_service.get_availability().await.unwrap();
    assert_eq!(report.status, AvailabilityStatus::Full);
}

#[tokio::test]
#[serial]
async fn test_strict_capacity_under_concurrent_submissions() {
    let (db, services) = setup(|settings| {
        settings.registration.strict_capacity = true;
    })
    .await;
    db.set_total_slots(3).await.unwrap();

    let submissions = (0..8).map(|_| {
        let service = services.registration_service.clone();
        tokio::spawn(async move { service.submit(registration_request("Sub-11")).await })
    });
    let results = futures::future::join_all(submissions).await;

    let accepted = results.iter().filter(|r| matches!(r, Ok(Ok(_)))).count();
    let refused = results
        .iter()
        .filter(|r| matches!(r, Ok(Err(PereirinhaError::NoSlotsAvailable))))
        .count();

    assert_eq!(accepted, 3);
    assert_eq!(refused, 5);
    assert_eq!(db.count_records("registrations").await.unwrap(), 3);
}

#[tokio::test]
#[serial]
async fn test_capacity_reduction_checks_stored_count() {
    let (db, services) = setup(|_| {}).await;
    db.insert_registrations(5, RegistrationStatus::Pending).await;
    let availability = &services.availability_service;

    assert!(!availability.can_reduce_capacity(4).await.unwrap());
    assert!(availability.can_reduce_capacity(5).await.unwrap());

    assert_matches!(
        availability
            .update_configuration(ConfigurationPatch { total_slots: Some(4), ..Default::default() }, false)
            .await,
        Err(PereirinhaError::CapacityBelowUsage { proposed: 4, used: 5 })
    );
    assert_eq!(availability.get_configuration().await.unwrap().total_slots, 30);
}

#[tokio::test]
#[serial]
async fn test_admin_status_workflow() {
    let (_db, services) = setup(|_| {}).await;
    let registration = services
        .registration_service
        .submit(registration_request("Sub-11"))
        .await
        .unwrap();

    let confirmed = services
        .registration_service
        .set_status(registration.id, RegistrationStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(confirmed.status, RegistrationStatus::Confirmed);

    let stats = services.dashboard_service.stats().await.unwrap();
    assert_eq!(stats.registrations_total, 1);
    assert_eq!(stats.recent_registrations.len(), 1);
    assert_eq!(stats.categories_total, 1);

    services.registration_service.delete(registration.id).await.unwrap();
    assert_matches!(
        services.registration_service.get(registration.id).await,
        Err(PereirinhaError::RegistrationNotFound { .. })
    );
}
