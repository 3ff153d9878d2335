//! Announcement repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest};
use crate::utils::errors::PereirinhaError;

#[derive(Debug, Clone)]
pub struct AnnouncementRepository {
    pool: PgPool,
}

impl AnnouncementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new unpublished announcement
    pub async fn create(&self, request: CreateAnnouncementRequest) -> Result<Announcement, PereirinhaError> {
        let now = Utc::now();
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            INSERT INTO announcements (id, title, body, published, created_at, updated_at)
            VALUES ($1, $2, $3, false, $4, $5)
            RETURNING id, title, body, published, created_at, updated_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(request.title)
        .bind(request.body)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(announcement)
    }

    /// Update announcement
    pub async fn update(&self, id: Uuid, request: UpdateAnnouncementRequest) -> Result<Announcement, PereirinhaError> {
        let announcement = sqlx::query_as::<_, Announcement>(
            r#"
            UPDATE announcements
            SET title = $2, body = $3, published = $4, updated_at = $5
            WHERE id = $1
            RETURNING id, title, body, published, created_at, updated_at
            "#
        )
        .bind(id)
        .bind(request.title)
        .bind(request.body)
        .bind(request.published)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        announcement.ok_or(PereirinhaError::AnnouncementNotFound { id })
    }

    /// Delete announcement
    pub async fn delete(&self, id: Uuid) -> Result<(), PereirinhaError> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PereirinhaError::AnnouncementNotFound { id });
        }

        Ok(())
    }

    /// All announcements, newest first
    pub async fn list(&self) -> Result<Vec<Announcement>, PereirinhaError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, published, created_at, updated_at FROM announcements ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    /// Published announcements, newest first
    pub async fn list_published(&self) -> Result<Vec<Announcement>, PereirinhaError> {
        let announcements = sqlx::query_as::<_, Announcement>(
            "SELECT id, title, body, published, created_at, updated_at FROM announcements WHERE published = true ORDER BY created_at DESC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(announcements)
    }

    /// Count total announcements
    pub async fn count(&self) -> Result<i64, PereirinhaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM announcements")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
