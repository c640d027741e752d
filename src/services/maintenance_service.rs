// src/services/maintenance_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{EquipmentRepository, MaintenanceRepository, WorkCenterRepository},
    models::{
        maintenance::{
            CreateMaintenancePayload, MaintenanceRequest, MaintenanceRequestDetail, NewMaintenanceRequest,
            UpdateMaintenancePayload,
        },
        scope::CompanyScope,
    },
};

#[derive(Clone)]
pub struct MaintenanceService {
    maintenance_repo: Arc<dyn MaintenanceRepository>,
    equipment_repo: Arc<dyn EquipmentRepository>,
    work_center_repo: Arc<dyn WorkCenterRepository>,
    enforce_transitions: bool,
}

impl MaintenanceService {
    pub fn new(
        maintenance_repo: Arc<dyn MaintenanceRepository>,
        equipment_repo: Arc<dyn EquipmentRepository>,
        work_center_repo: Arc<dyn WorkCenterRepository>,
        enforce_transitions: bool,
    ) -> Self {
        Self { maintenance_repo, equipment_repo, work_center_repo, enforce_transitions }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        self.maintenance_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<MaintenanceRequestDetail, AppError> {
        self.maintenance_repo
            .find(id)
            .await?
            .ok_or(AppError::NotFound("Maintenance request"))
    }

    /// `requested_by` é o usuário autenticado; vale quando o payload não traz outro.
    pub async fn create(
        &self,
        payload: CreateMaintenancePayload,
        requested_by: Uuid,
    ) -> Result<MaintenanceRequest, AppError> {
        payload.validate_target()?;

        let mut request = NewMaintenanceRequest::from_payload(payload, requested_by);
        if request.company_id.is_none() {
            request.company_id = self.inherited_company(&request).await?;
        }

        let created = self.maintenance_repo.create(request).await?;
        tracing::info!(
            request_id = %created.id,
            status = %created.status,
            company_id = ?created.company_id,
            "Pedido de manutenção criado"
        );
        Ok(created)
    }

    // Empresa do equipamento; na falta dele, a do centro de trabalho.
    async fn inherited_company(&self, request: &NewMaintenanceRequest) -> Result<Option<Uuid>, AppError> {
        if let Some(equipment_id) = request.equipment_id {
            let equipment = self
                .equipment_repo
                .find(equipment_id)
                .await?
                .ok_or(AppError::InvalidReference)?;
            return Ok(Some(equipment.equipment.company_id));
        }
        if let Some(work_center_id) = request.work_center_id {
            let work_center = self
                .work_center_repo
                .find(work_center_id)
                .await?
                .ok_or(AppError::InvalidReference)?;
            return Ok(Some(work_center.work_center.company_id));
        }
        Ok(None)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateMaintenancePayload) -> Result<MaintenanceRequest, AppError> {
        if self.enforce_transitions {
            if let Some(next) = payload.status {
                let current = self.get_by_id(id).await?.request.status;
                if !current.can_transition_to(next) {
                    tracing::warn!(request_id = %id, from = %current, to = %next, "Transição de status recusada");
                    return Err(AppError::InvalidStatusTransition { from: current, to: next });
                }
            }
        }

        let updated = self
            .maintenance_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Maintenance request"))?;
        tracing::info!(request_id = %id, status = %updated.status, "Pedido de manutenção atualizado");
        Ok(updated)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.maintenance_repo.delete(id).await? {
            return Err(AppError::NotFound("Maintenance request"));
        }
        tracing::info!(request_id = %id, "Pedido de manutenção removido");
        Ok(())
    }
}
