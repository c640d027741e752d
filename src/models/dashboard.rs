// src/models/dashboard.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

use super::maintenance::{RequestStatus, RequestType};

// Contagens brutas vindas do banco; o serviço deriva o resto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardCounts {
    pub total_equipment: i64,
    pub critical_equipment: i64,
    pub total_requests: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub total_teams: i64,
    pub total_technicians: i64,
    pub overdue: i64,
}

// Amostra mínima de um pedido para os agrupamentos por status/tipo/mês
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct RequestSample {
    pub status: RequestStatus,
    pub request_type: RequestType,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MonthCount {
    #[schema(example = "Oct")]
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_equipment: i64,
    pub critical: i64,
    pub total_requests: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completed: i64,
    pub overdue: i64,
    pub total_teams: i64,
    pub total_technicians: i64,
    /// Carga da equipe técnica, 0..=100.
    #[schema(example = 50, minimum = 0, maximum = 100)]
    pub load: u8,
    pub status_breakdown: BTreeMap<String, i64>,
    pub type_breakdown: BTreeMap<String, i64>,
    pub month_breakdown: Vec<MonthCount>,
}
