//! Category service implementation

use tracing::{debug, info};
use uuid::Uuid;
use crate::database::repositories::CategoryRepository;
use crate::models::category::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::utils::errors::{PereirinhaError, Result};
use crate::utils::helpers::{non_empty, normalize_whitespace};

/// Category service for managing age-group categories
#[derive(Clone)]
pub struct CategoryService {
    category_repository: CategoryRepository,
}

impl CategoryService {
    /// Create a new CategoryService instance
    pub fn new(category_repository: CategoryRepository) -> Self {
        Self { category_repository }
    }

    /// Categories offered on the public form
    pub async fn list_active(&self) -> Result<Vec<Category>> {
        self.category_repository.list_active().await
    }

    /// All categories, for the admin panel
    pub async fn list_all(&self) -> Result<Vec<Category>> {
        self.category_repository.list().await
    }

    pub async fn create(&self, request: CreateCategoryRequest) -> Result<Category> {
        let request = CreateCategoryRequest {
            name: validate_name(&request.name)?,
            description: non_empty(request.description),
        };

        let category = self.category_repository.create(request).await?;
        info!(category_id = %category.id, name = %category.name, "Category created");

        Ok(category)
    }

    pub async fn update(&self, id: Uuid, request: UpdateCategoryRequest) -> Result<Category> {
        let request = UpdateCategoryRequest {
            name: validate_name(&request.name)?,
            description: non_empty(request.description),
            active: request.active,
        };

        let category = self.category_repository.update(id, request).await?;
        debug!(category_id = %id, active = category.active, "Category updated");

        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        self.category_repository.delete(id).await?;
        info!(category_id = %id, "Category deleted");

        Ok(())
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = normalize_whitespace(name);
    if name.is_empty() {
        return Err(PereirinhaError::InvalidInput("Category name is required".to_string()));
    }
    Ok(name)
}
