// src/handlers/company.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        company::{Company, CompanyDetail, CompanyOverview, CreateCompanyPayload, UpdateCompanyPayload},
        scope::CompanyScope,
    },
};

#[utoipa::path(
    get,
    path = "/api/companies",
    tag = "Companies",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Restringe à própria empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Empresas com contadores", body = [CompanyOverview]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_companies(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<CompanyOverview>>, AppError> {
    let companies = app_state.company_service.get_all(scope).await?;
    Ok(ApiResponse::ok(companies))
}

#[utoipa::path(
    get,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa com membros", body = CompanyDetail),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<CompanyDetail>, AppError> {
    let company = app_state.company_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(company))
}

// O criador vira "owner" da nova empresa
#[utoipa::path(
    post,
    path = "/api/companies",
    tag = "Companies",
    request_body = CreateCompanyPayload,
    responses(
        (status = 201, description = "Empresa criada", body = Company),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_company(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateCompanyPayload>,
) -> Result<ApiResponse<Company>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state.company_service.create(payload, user.id).await?;
    Ok(ApiResponse::created(company).with_message("Company created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/companies/{id}",
    tag = "Companies",
    request_body = UpdateCompanyPayload,
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa atualizada", body = Company),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCompanyPayload>,
) -> Result<ApiResponse<Company>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let company = app_state.company_service.update(id, payload).await?;
    Ok(ApiResponse::ok(company).with_message("Company updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/companies/{id}",
    tag = "Companies",
    params(("id" = Uuid, Path, description = "ID da empresa")),
    responses(
        (status = 200, description = "Empresa removida (em cascata)"),
        (status = 404, description = "Empresa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_company(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.company_service.delete(id).await?;
    Ok(ApiResponse::message("Company deleted successfully"))
}
