//! Category repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::utils::errors::PereirinhaError;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: PgPool,
}

impl CategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new category, active by default
    pub async fn create(&self, request: CreateCategoryRequest) -> Result<Category, PereirinhaError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name, description, active, created_at)
            VALUES ($1, $2, $3, true, $4)
            RETURNING id, name, description, active, created_at
            "#
        )
        .bind(Uuid::new_v4())
        .bind(request.name)
        .bind(request.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(category)
    }

    /// Update name, description and active flag
    pub async fn update(&self, id: Uuid, request: UpdateCategoryRequest) -> Result<Category, PereirinhaError> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = $2, description = $3, active = $4
            WHERE id = $1
            RETURNING id, name, description, active, created_at
            "#
        )
        .bind(id)
        .bind(request.name)
        .bind(request.description)
        .bind(request.active)
        .fetch_optional(&self.pool)
        .await?;

        category.ok_or(PereirinhaError::CategoryNotFound { id })
    }

    /// Delete category
    pub async fn delete(&self, id: Uuid) -> Result<(), PereirinhaError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PereirinhaError::CategoryNotFound { id });
        }

        Ok(())
    }

    /// All categories in creation order
    pub async fn list(&self) -> Result<Vec<Category>, PereirinhaError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, active, created_at FROM categories ORDER BY created_at ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Active categories by name, as offered on the public form
    pub async fn list_active(&self) -> Result<Vec<Category>, PereirinhaError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, active, created_at FROM categories WHERE active = true ORDER BY name ASC"
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Find an active category by exact name
    pub async fn find_active_by_name(&self, name: &str) -> Result<Option<Category>, PereirinhaError> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, description, active, created_at FROM categories WHERE name = $1 AND active = true LIMIT 1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    /// Count total categories
    pub async fn count(&self) -> Result<i64, PereirinhaError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }
}
