//! Repository tests against PostgreSQL
//!
//! Uses `TEST_DATABASE_URL` when set, otherwise starts a container.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, SubsecRound, Utc};
use serial_test::serial;
use uuid::Uuid;
use helpers::*;
use pereirinha::capacity::CountingPolicy;
use pereirinha::models::{
    ConfigurationPatch, CreateAnnouncementRequest, RegistrationFilter, RegistrationStatus, SiteSettings,
    UpdateAnnouncementRequest, UpdateCategoryRequest,
};
use pereirinha::PereirinhaError;

#[tokio::test]
#[serial]
async fn test_configuration_partial_update() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().configuration;

    let seeded = repository.get().await.unwrap();
    assert_eq!(seeded.total_slots, 30);
    assert_eq!(seeded.registration_deadline, None);

    let deadline = (Utc::now() + Duration::days(10)).trunc_subsecs(6);
    let updated = repository
        .update(ConfigurationPatch {
            registration_deadline: Some(deadline),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.total_slots, 30);
    assert_eq!(updated.registration_deadline, Some(deadline));

    let updated = repository
        .update(ConfigurationPatch {
            total_slots: Some(45),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(updated.total_slots, 45);
    assert_eq!(updated.registration_deadline, Some(deadline));

    let cleared = repository
        .update(ConfigurationPatch {
            clear_deadline: true,
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(cleared.registration_deadline, None);
    assert_eq!(cleared.total_slots, 45);
}

#[tokio::test]
#[serial]
async fn test_registration_count_policies() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.insert_registrations(3, RegistrationStatus::Pending).await;
    db.insert_registrations(2, RegistrationStatus::Cancelled).await;

    let repository = db.service().registrations;
    assert_eq!(repository.count(CountingPolicy::AllRegistrations).await.unwrap(), 5);
    assert_eq!(repository.count(CountingPolicy::ExcludeCancelled).await.unwrap(), 3);
}

#[tokio::test]
#[serial]
async fn test_registration_search_and_status_filter() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().registrations;

    let ana = repository
        .create(named_registration("Ana Pereira", "ana@example.com", "Centro"))
        .await
        .unwrap();
    repository
        .create(named_registration("Bruno Lima", "bruno@example.com", "Vila Nova"))
        .await
        .unwrap();
    repository
        .create(named_registration("Carla 100% Silva", "carla@example.com", "Centro"))
        .await
        .unwrap();
    repository.update_status(ana.id, RegistrationStatus::Confirmed).await.unwrap();

    let by_neighborhood = repository
        .list(&RegistrationFilter {
            search: Some("centro".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(by_neighborhood.len(), 2);

    let confirmed = repository
        .list(&RegistrationFilter {
            search: Some("centro".to_string()),
            status: Some(RegistrationStatus::Confirmed),
        })
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 1);
    assert_eq!(confirmed[0].id, ana.id);

    // Wildcards in the search term match literally
    let literal = repository
        .list(&RegistrationFilter {
            search: Some("100%".to_string()),
            status: None,
        })
        .await
        .unwrap();
    assert_eq!(literal.len(), 1);

    let everyone = repository.list(&RegistrationFilter::default()).await.unwrap();
    assert_eq!(everyone.len(), 3);
    assert!(everyone.windows(2).all(|pair| pair[0].submitted_at >= pair[1].submitted_at));
}

#[tokio::test]
#[serial]
async fn test_registration_not_found() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().registrations;
    let id = Uuid::new_v4();

    assert_matches!(
        repository.update_status(id, RegistrationStatus::Confirmed).await,
        Err(PereirinhaError::RegistrationNotFound { .. })
    );
    assert_matches!(repository.delete(id).await, Err(PereirinhaError::RegistrationNotFound { .. }));
    assert!(repository.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_create_within_capacity_stops_at_total() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    db.set_total_slots(2).await.unwrap();
    let repository = db.service().registrations;

    for _ in 0..2 {
        let created = repository
            .create_within_capacity(registration_request("Sub-11"), CountingPolicy::AllRegistrations)
            .await
            .unwrap();
        assert!(created.is_some());
    }

    let refused = repository
        .create_within_capacity(registration_request("Sub-11"), CountingPolicy::AllRegistrations)
        .await
        .unwrap();
    assert!(refused.is_none());
    assert_eq!(db.count_records("registrations").await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_categories_active_listing() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().categories;

    let sub13 = db.create_category("Sub-13").await;
    db.create_category("Sub-11").await;
    repository
        .update(
            sub13.id,
            UpdateCategoryRequest {
                name: "Sub-13".to_string(),
                description: Some("Paused".to_string()),
                active: false,
            },
        )
        .await
        .unwrap();

    let active = repository.list_active().await.unwrap();
    assert_eq!(active.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(), vec!["Sub-11"]);
    assert!(repository.find_active_by_name("Sub-13").await.unwrap().is_none());
    assert!(repository.find_active_by_name("Sub-11").await.unwrap().is_some());
    assert_eq!(repository.count().await.unwrap(), 2);

    assert_matches!(
        repository.delete(Uuid::new_v4()).await,
        Err(PereirinhaError::CategoryNotFound { .. })
    );
}

#[tokio::test]
#[serial]
async fn test_announcements_publishing() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().announcements;

    let draft = repository
        .create(CreateAnnouncementRequest {
            title: "Treino cancelado".to_string(),
            body: "Chuva forte no sábado".to_string(),
        })
        .await
        .unwrap();
    assert!(!draft.published);
    assert!(repository.list_published().await.unwrap().is_empty());

    let published = repository
        .update(
            draft.id,
            UpdateAnnouncementRequest {
                title: draft.title.clone(),
                body: draft.body.clone(),
                published: true,
            },
        )
        .await
        .unwrap();
    assert!(published.updated_at >= draft.updated_at);
    assert_eq!(repository.list_published().await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_site_settings_updates() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let repository = db.service().site_settings;

    let setting = repository.update("schedule", "Sábados, 9h").await.unwrap();
    assert_eq!(setting.value, "Sábados, 9h");

    assert_matches!(
        repository.update("favorite_color", "blue").await,
        Err(PereirinhaError::SettingNotFound { .. })
    );

    // An unknown key rolls back the whole batch
    let mut batch = SiteSettings::new();
    batch.insert("address".to_string(), "Rua A, 10".to_string());
    batch.insert("unknown".to_string(), "x".to_string());
    assert!(repository.update_many(&batch).await.is_err());

    let all = repository.get_all().await.unwrap();
    assert_eq!(all["address"], "");
    assert_eq!(all["schedule"], "Sábados, 9h");
    assert_eq!(all.len(), 4);
}
