//! Announcement service implementation

use tracing::info;
use uuid::Uuid;
use crate::database::repositories::AnnouncementRepository;
use crate::models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::utils::errors::{PereirinhaError, Result};

/// Announcement service for the public notice board
#[derive(Clone)]
pub struct AnnouncementService {
    announcement_repository: AnnouncementRepository,
}

impl AnnouncementService {
    /// Create a new AnnouncementService instance
    pub fn new(announcement_repository: AnnouncementRepository) -> Self {
        Self { announcement_repository }
    }

    pub async fn list_published(&self) -> Result<Vec<Announcement>> {
        self.announcement_repository.list_published().await
    }

    pub async fn list_all(&self) -> Result<Vec<Announcement>> {
        self.announcement_repository.list().await
    }

    /// Create a draft announcement
    pub async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement> {
        let (title, body) = validate_content(&request.title, &request.body)?;
        let announcement = self
            .announcement_repository
            .create(CreateAnnouncementRequest { title, body })
            .await?;
        info!(announcement_id = %announcement.id, "Announcement created");

        Ok(announcement)
    }

    pub async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement> {
        let (title, body) = validate_content(&request.title, &request.body)?;
        let announcement = self
            .announcement_repository
            .update(id, UpdateAnnouncementRequest { title, body, published: request.published })
            .await?;
        info!(announcement_id = %id, published = announcement.published, "Announcement updated");

        Ok(announcement)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.announcement_repository.delete(id).await?;
        info!(announcement_id = %id, "Announcement deleted");

        Ok(())
    }
}

fn validate_content(title: &str, body: &str) -> Result<(String, String)> {
    let title = title.trim();
    let body = body.trim();

    if title.is_empty() {
        return Err(PereirinhaError::InvalidInput("Announcement title is required".to_string()));
    }
    if body.is_empty() {
        return Err(PereirinhaError::InvalidInput("Announcement body is required".to_string()));
    }

    Ok((title.to_string(), body.to_string()))
}
