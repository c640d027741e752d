// src/handlers/dashboard.rs

use axum::extract::{Query, State};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::{dashboard::DashboardStats, maintenance::MaintenanceRequestDetail, scope::CompanyScope},
    services::dashboard_service::normalize_limit,
};

// `limit` chega como texto: valores inválidos caem no padrão em vez de 400
#[derive(Debug, Deserialize, IntoParams)]
pub struct RecentRequestsQuery {
    /// Máximo de itens (padrão 10, teto 100)
    #[param(value_type = Option<i64>)]
    pub limit: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    tag = "Dashboard",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Indicadores do painel", body = DashboardStats),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_stats(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<DashboardStats>, AppError> {
    let stats = app_state.dashboard_service.get_stats(scope, Utc::now()).await?;
    Ok(ApiResponse::ok(stats))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/recent-requests",
    tag = "Dashboard",
    params(
        RecentRequestsQuery,
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Requisições mais recentes", body = [MaintenanceRequestDetail]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_recent_requests(
    State(app_state): State<AppState>,
    scope: CompanyScope,
    Query(query): Query<RecentRequestsQuery>,
) -> Result<ApiResponse<Vec<MaintenanceRequestDetail>>, AppError> {
    let limit = normalize_limit(query.limit.as_deref());
    let requests = app_state.dashboard_service.get_recent_requests(scope, limit).await?;
    Ok(ApiResponse::ok(requests))
}
