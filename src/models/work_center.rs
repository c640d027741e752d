// src/models/work_center.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use crate::common::{serde_helpers::nullable, validation};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkCenter {
    pub id: Uuid,
    #[schema(example = "Linha de Montagem 1")]
    pub name: String,
    #[schema(example = "WC-001")]
    pub code: Option<String>,
    pub tag: Option<String>,
    pub alternative_work_centers: Option<String>,
    #[schema(example = "120.00")]
    pub cost_per_hour: Option<Decimal>,
    pub capacity: Option<Decimal>,
    #[schema(example = "95.00")]
    pub time_efficiency: Option<Decimal>,
    #[schema(example = "85.00")]
    pub oee_target: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkCenterDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub work_center: WorkCenter,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkCenterPayload {
    #[validate(length(min = 1, message = "Work center name is required"))]
    pub name: String,
    pub code: Option<String>,
    pub tag: Option<String>,
    pub alternative_work_centers: Option<String>,
    pub cost_per_hour: Option<Decimal>,
    pub capacity: Option<Decimal>,
    pub time_efficiency: Option<Decimal>,
    pub oee_target: Option<Decimal>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub company_id: Uuid,
}

impl CreateWorkCenterPayload {
    pub fn validate_figures(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::not_negative(&mut errors, "costPerHour", self.cost_per_hour.as_ref());
        validation::not_negative(&mut errors, "capacity", self.capacity.as_ref());
        validation::percentage(&mut errors, "timeEfficiency", self.time_efficiency.as_ref());
        validation::percentage(&mut errors, "oeeTarget", self.oee_target.as_ref());
        validation::into_result(errors)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkCenterPayload {
    #[validate(length(min = 1, message = "Work center name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub code: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub tag: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub alternative_work_centers: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub cost_per_hour: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub capacity: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub time_efficiency: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<f64>)]
    pub oee_target: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl UpdateWorkCenterPayload {
    pub fn validate_figures(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        validation::not_negative(&mut errors, "costPerHour", self.cost_per_hour.flatten().as_ref());
        validation::not_negative(&mut errors, "capacity", self.capacity.flatten().as_ref());
        validation::percentage(&mut errors, "timeEfficiency", self.time_efficiency.flatten().as_ref());
        validation::percentage(&mut errors, "oeeTarget", self.oee_target.flatten().as_ref());
        validation::into_result(errors)
    }
}
