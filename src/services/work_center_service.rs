// src/services/work_center_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::WorkCenterRepository,
    models::{
        scope::CompanyScope,
        work_center::{CreateWorkCenterPayload, UpdateWorkCenterPayload, WorkCenter, WorkCenterDetail},
    },
};

#[derive(Clone)]
pub struct WorkCenterService {
    work_center_repo: Arc<dyn WorkCenterRepository>,
}

impl WorkCenterService {
    pub fn new(work_center_repo: Arc<dyn WorkCenterRepository>) -> Self {
        Self { work_center_repo }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<WorkCenterDetail>, AppError> {
        self.work_center_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<WorkCenterDetail, AppError> {
        self.work_center_repo.find(id).await?.ok_or(AppError::NotFound("Work center"))
    }

    pub async fn create(&self, payload: CreateWorkCenterPayload) -> Result<WorkCenter, AppError> {
        let work_center = self.work_center_repo.create(payload).await?;
        tracing::info!(work_center_id = %work_center.id, company_id = %work_center.company_id, "Centro de trabalho criado");
        Ok(work_center)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateWorkCenterPayload) -> Result<WorkCenter, AppError> {
        let work_center = self
            .work_center_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Work center"))?;
        tracing::info!(work_center_id = %id, "Centro de trabalho atualizado");
        Ok(work_center)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.work_center_repo.delete(id).await? {
            return Err(AppError::NotFound("Work center"));
        }
        tracing::info!(work_center_id = %id, "Centro de trabalho removido");
        Ok(())
    }
}
