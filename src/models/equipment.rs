// src/models/equipment.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_helpers::nullable;

/// Abaixo deste percentual de saúde o equipamento conta como crítico no dashboard.
pub const CRITICAL_HEALTH_THRESHOLD: i32 = 30;

// --- Enums ---
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "equipment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    Active,
    Inactive,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    #[schema(example = "Compressor de Ar 02")]
    pub name: String,
    pub description: Option<String>,
    #[schema(example = "SN-2291-XK")]
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    pub status: EquipmentStatus,
    #[schema(example = 87, minimum = 0, maximum = 100)]
    pub health_percentage: i32,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub used_by_user_id: Option<Uuid>,
    pub technician_user_id: Option<Uuid>,
    pub maintenance_team_id: Option<Uuid>,
    pub assigned_date: Option<NaiveDate>,
    pub scrap_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
impl Equipment {
    pub fn is_critical(&self) -> bool {
        self.health_percentage < CRITICAL_HEALTH_THRESHOLD
    }
}

// Equipamento + nomes das relações diretas
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub equipment: Equipment,
    pub category_name: Option<String>,
    pub company_name: Option<String>,
    pub work_center_name: Option<String>,
    pub team_name: Option<String>,
    pub technician_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentPayload {
    #[validate(length(min = 1, message = "Equipment name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub manufacturer: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub status: EquipmentStatus,
    #[validate(range(min = 0, max = 100, message = "Health must be between 0 and 100"))]
    pub health_percentage: Option<i32>,
    pub company_id: Uuid,
    pub category_id: Option<Uuid>,
    pub work_center_id: Option<Uuid>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub used_by_user_id: Option<Uuid>,
    pub technician_user_id: Option<Uuid>,
    pub maintenance_team_id: Option<Uuid>,
    pub assigned_date: Option<NaiveDate>,
    pub scrap_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentPayload {
    #[validate(length(min = 1, message = "Equipment name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub serial_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub model: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub manufacturer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub purchase_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub warranty_expiry: Option<Option<NaiveDate>>,
    pub status: Option<EquipmentStatus>,
    #[validate(range(min = 0, max = 100, message = "Health must be between 0 and 100"))]
    pub health_percentage: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub work_center_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub used_by_user_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub technician_user_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<Uuid>)]
    pub maintenance_team_id: Option<Option<Uuid>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub assigned_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub scrap_date: Option<Option<NaiveDate>>,
}
