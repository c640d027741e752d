// src/services/category_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CategoryRepository,
    models::{
        category::{CategoryDetail, CreateCategoryPayload, EquipmentCategory, UpdateCategoryPayload},
        scope::CompanyScope,
    },
};

#[derive(Clone)]
pub struct CategoryService {
    category_repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(category_repo: Arc<dyn CategoryRepository>) -> Self {
        Self { category_repo }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<CategoryDetail>, AppError> {
        self.category_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CategoryDetail, AppError> {
        self.category_repo.find(id).await?.ok_or(AppError::NotFound("Category"))
    }

    pub async fn create(&self, payload: CreateCategoryPayload) -> Result<EquipmentCategory, AppError> {
        let category = self.category_repo.create(payload).await?;
        tracing::info!(category_id = %category.id, company_id = %category.company_id, "Categoria criada");
        Ok(category)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCategoryPayload) -> Result<EquipmentCategory, AppError> {
        let category = self
            .category_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Category"))?;
        tracing::info!(category_id = %id, "Categoria atualizada");
        Ok(category)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.category_repo.delete(id).await? {
            return Err(AppError::NotFound("Category"));
        }
        tracing::info!(category_id = %id, "Categoria removida");
        Ok(())
    }
}
