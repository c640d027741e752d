// src/services/equipment_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::EquipmentRepository,
    models::{
        equipment::{CreateEquipmentPayload, Equipment, EquipmentDetail, UpdateEquipmentPayload},
        scope::CompanyScope,
    },
};

#[derive(Clone)]
pub struct EquipmentService {
    equipment_repo: Arc<dyn EquipmentRepository>,
}

impl EquipmentService {
    pub fn new(equipment_repo: Arc<dyn EquipmentRepository>) -> Self {
        Self { equipment_repo }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<EquipmentDetail>, AppError> {
        self.equipment_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<EquipmentDetail, AppError> {
        self.equipment_repo.find(id).await?.ok_or(AppError::NotFound("Equipment"))
    }

    pub async fn create(&self, payload: CreateEquipmentPayload) -> Result<Equipment, AppError> {
        let equipment = self.equipment_repo.create(payload).await?;
        tracing::info!(equipment_id = %equipment.id, company_id = %equipment.company_id, "Equipamento criado");
        Ok(equipment)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateEquipmentPayload) -> Result<Equipment, AppError> {
        let equipment = self
            .equipment_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Equipment"))?;
        tracing::info!(equipment_id = %id, health = equipment.health_percentage, "Equipamento atualizado");
        Ok(equipment)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.equipment_repo.delete(id).await? {
            return Err(AppError::NotFound("Equipment"));
        }
        tracing::info!(equipment_id = %id, "Equipamento removido");
        Ok(())
    }
}
