// src/handlers/work_center.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    models::{
        scope::CompanyScope,
        work_center::{CreateWorkCenterPayload, UpdateWorkCenterPayload, WorkCenter, WorkCenterDetail},
    },
};

#[utoipa::path(
    get,
    path = "/api/work-centers",
    tag = "Work Centers",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Centros de trabalho", body = [WorkCenterDetail]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_work_centers(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<WorkCenterDetail>>, AppError> {
    let work_centers = app_state.work_center_service.get_all(scope).await?;
    Ok(ApiResponse::ok(work_centers))
}

#[utoipa::path(
    get,
    path = "/api/work-centers/{id}",
    tag = "Work Centers",
    params(("id" = Uuid, Path, description = "ID do centro de trabalho")),
    responses(
        (status = 200, description = "Centro de trabalho", body = WorkCenterDetail),
        (status = 404, description = "Centro de trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_work_center(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<WorkCenterDetail>, AppError> {
    let work_center = app_state.work_center_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(work_center))
}

#[utoipa::path(
    post,
    path = "/api/work-centers",
    tag = "Work Centers",
    request_body = CreateWorkCenterPayload,
    responses(
        (status = 201, description = "Centro de trabalho criado", body = WorkCenter),
        (status = 400, description = "Dados inválidos (percentuais 0-100, valores não negativos)"),
        (status = 409, description = "Empresa inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_work_center(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateWorkCenterPayload>,
) -> Result<ApiResponse<WorkCenter>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_figures().map_err(AppError::ValidationError)?;

    let work_center = app_state.work_center_service.create(payload).await?;
    Ok(ApiResponse::created(work_center).with_message("Work center created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/work-centers/{id}",
    tag = "Work Centers",
    request_body = UpdateWorkCenterPayload,
    params(("id" = Uuid, Path, description = "ID do centro de trabalho")),
    responses(
        (status = 200, description = "Centro de trabalho atualizado", body = WorkCenter),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Centro de trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_work_center(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateWorkCenterPayload>,
) -> Result<ApiResponse<WorkCenter>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    payload.validate_figures().map_err(AppError::ValidationError)?;

    let work_center = app_state.work_center_service.update(id, payload).await?;
    Ok(ApiResponse::ok(work_center).with_message("Work center updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/work-centers/{id}",
    tag = "Work Centers",
    params(("id" = Uuid, Path, description = "ID do centro de trabalho")),
    responses(
        (status = 200, description = "Centro de trabalho removido"),
        (status = 404, description = "Centro de trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_work_center(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.work_center_service.delete(id).await?;
    Ok(ApiResponse::message("Work center deleted successfully"))
}
