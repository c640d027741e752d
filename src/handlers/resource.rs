// src/handlers/resource.rs

use axum::extract::State;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::{
        auth::UserSummary, category::EquipmentCategory, company::Company, scope::CompanyScope,
        team::MaintenanceTeam, work_center::WorkCenter,
    },
};

#[utoipa::path(
    get,
    path = "/api/resources/categories",
    tag = "Resources",
    params(("companyId" = Option<Uuid>, Query, description = "Filtra por empresa")),
    responses((status = 200, description = "Categorias (id, nome)", body = [EquipmentCategory])),
    security(("api_jwt" = []))
)]
pub async fn categories(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<EquipmentCategory>>, AppError> {
    Ok(ApiResponse::ok(app_state.resource_service.categories(scope).await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/companies",
    tag = "Resources",
    responses((status = 200, description = "Empresas", body = [Company])),
    security(("api_jwt" = []))
)]
pub async fn companies(State(app_state): State<AppState>) -> Result<ApiResponse<Vec<Company>>, AppError> {
    Ok(ApiResponse::ok(app_state.resource_service.companies().await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/teams",
    tag = "Resources",
    params(("companyId" = Option<Uuid>, Query, description = "Filtra por empresa")),
    responses((status = 200, description = "Equipes", body = [MaintenanceTeam])),
    security(("api_jwt" = []))
)]
pub async fn teams(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<MaintenanceTeam>>, AppError> {
    Ok(ApiResponse::ok(app_state.resource_service.teams(scope).await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/users",
    tag = "Resources",
    responses((status = 200, description = "Usuários (sem hash de senha)", body = [UserSummary])),
    security(("api_jwt" = []))
)]
pub async fn users(State(app_state): State<AppState>) -> Result<ApiResponse<Vec<UserSummary>>, AppError> {
    Ok(ApiResponse::ok(app_state.resource_service.users().await?))
}

#[utoipa::path(
    get,
    path = "/api/resources/work-centers",
    tag = "Resources",
    params(("companyId" = Option<Uuid>, Query, description = "Filtra por empresa")),
    responses((status = 200, description = "Centros de trabalho", body = [WorkCenter])),
    security(("api_jwt" = []))
)]
pub async fn work_centers(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<WorkCenter>>, AppError> {
    Ok(ApiResponse::ok(app_state.resource_service.work_centers(scope).await?))
}
