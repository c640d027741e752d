// src/models/maintenance.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::common::serde_helpers::nullable;

// --- Enums ---

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_priority", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "request_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    #[default]
    Corrective,
    Preventive,
    Predictive,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::InProgress,
        RequestStatus::Completed,
        RequestStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Completed | RequestStatus::Cancelled)
    }

    /// Grafo do ciclo de vida: pending -> in_progress -> completed,
    /// e cancelled a partir de qualquer estado não terminal.
    /// Manter o mesmo status é sempre permitido.
    pub fn can_transition_to(&self, next: RequestStatus) -> bool {
        if *self == next {
            return true;
        }
        match (self, next) {
            (RequestStatus::Pending, RequestStatus::InProgress) => true,
            (RequestStatus::InProgress, RequestStatus::Completed) => true,
            (from, RequestStatus::Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    pub fn stage(&self) -> MaintenanceStage {
        match self {
            RequestStatus::Pending => MaintenanceStage::NewRequest,
            RequestStatus::InProgress => MaintenanceStage::InProgress,
            RequestStatus::Completed => MaintenanceStage::Repaired,
            RequestStatus::Cancelled => MaintenanceStage::Scrap,
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Corrective => "corrective",
            RequestType::Preventive => "preventive",
            RequestType::Predictive => "predictive",
        }
    }
}

// ---
// Stage: vocabulário da tela (kanban). Não é persistido; sempre derivado do status.
// ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStage {
    NewRequest,
    InProgress,
    Repaired,
    Scrap,
}

impl MaintenanceStage {
    pub fn label(&self) -> &'static str {
        match self {
            MaintenanceStage::NewRequest => "New",
            MaintenanceStage::InProgress => "In Progress",
            MaintenanceStage::Repaired => "Repaired",
            MaintenanceStage::Scrap => "Scrap",
        }
    }

    #[cfg(test)]
    pub fn status(&self) -> RequestStatus {
        match self {
            MaintenanceStage::NewRequest => RequestStatus::Pending,
            MaintenanceStage::InProgress => RequestStatus::InProgress,
            MaintenanceStage::Repaired => RequestStatus::Completed,
            MaintenanceStage::Scrap => RequestStatus::Cancelled,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StageInfo {
    pub stage: MaintenanceStage,
    #[schema(example = "In Progress")]
    pub label: &'static str,
    pub status: RequestStatus,
}

impl StageInfo {
    pub fn table() -> Vec<StageInfo> {
        RequestStatus::ALL
            .iter()
            .map(|status| {
                let stage = status.stage();
                StageInfo { stage, label: stage.label(), status: *status }
            })
            .collect()
    }
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: Uuid,
    #[schema(example = "Vazamento de óleo no compressor")]
    pub title: String,
    pub description: Option<String>,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    #[serde(rename = "type")]
    pub request_type: RequestType,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub equipment_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub requested_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl MaintenanceRequest {
    /// Agendada no passado e ainda aberta.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.status.is_terminal() && self.scheduled_date.is_some_and(|date| date < now)
    }
}

// Pedido + nomes resolvidos (usado na listagem e no feed do dashboard)
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequestDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub request: MaintenanceRequest,
    pub equipment_name: Option<String>,
    pub work_center_name: Option<String>,
    pub category_name: Option<String>,
    pub company_name: Option<String>,
    pub team_name: Option<String>,
    pub requested_by_name: Option<String>,
    pub assigned_to_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenancePayload {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: RequestPriority,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default, rename = "type")]
    pub request_type: RequestType,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub equipment_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    /// Quando ausente, assume o usuário autenticado.
    pub requested_by_id: Option<Uuid>,
    pub assigned_to_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

impl CreateMaintenancePayload {
    // Regra: o pedido precisa apontar para um equipamento OU um centro de trabalho.
    pub fn validate_target(&self) -> Result<(), ValidationErrors> {
        if self.equipment_id.is_none() && self.work_center_id.is_none() {
            let mut err = ValidationError::new("target_required");
            err.message = Some("Either equipmentId or workCenterId is required".into());
            let mut errors = ValidationErrors::new();
            errors.add("equipmentId", err);
            return Err(errors);
        }
        Ok(())
    }
}

// Pedido pronto para o INSERT (defaults aplicados, empresa resolvida)
#[derive(Debug, Clone)]
pub struct NewMaintenanceRequest {
    pub title: String,
    pub description: Option<String>,
    pub priority: RequestPriority,
    pub status: RequestStatus,
    pub request_type: RequestType,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub equipment_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub company_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub requested_by_id: Uuid,
    pub assigned_to_id: Option<Uuid>,
    pub team_id: Option<Uuid>,
}

impl NewMaintenanceRequest {
    pub fn from_payload(payload: CreateMaintenancePayload, requested_by_id: Uuid) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            priority: payload.priority,
            status: payload.status,
            request_type: payload.request_type,
            scheduled_date: payload.scheduled_date,
            completed_date: payload.completed_date,
            equipment_id: payload.equipment_id,
            work_center_id: payload.work_center_id,
            company_id: payload.company_id,
            category_id: payload.category_id,
            requested_by_id: payload.requested_by_id.unwrap_or(requested_by_id),
            assigned_to_id: payload.assigned_to_id,
            team_id: payload.team_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenancePayload {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    pub priority: Option<RequestPriority>,
    pub status: Option<RequestStatus>,
    #[serde(rename = "type")]
    pub request_type: Option<RequestType>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub scheduled_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub completed_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub equipment_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub work_center_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub assigned_to_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub team_id: Option<Option<Uuid>>,
}
