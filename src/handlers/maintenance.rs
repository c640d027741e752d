// src/handlers/maintenance.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        maintenance::{
            CreateMaintenancePayload, MaintenanceRequest, MaintenanceRequestDetail, StageInfo,
            UpdateMaintenancePayload,
        },
        scope::CompanyScope,
    },
};

#[utoipa::path(
    get,
    path = "/api/maintenance",
    tag = "Maintenance",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Requisições, mais recentes primeiro", body = [MaintenanceRequestDetail]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<MaintenanceRequestDetail>>, AppError> {
    let requests = app_state.maintenance_service.get_all(scope).await?;
    Ok(ApiResponse::ok(requests))
}

#[utoipa::path(
    get,
    path = "/api/maintenance/{id}",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição", body = MaintenanceRequestDetail),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_request(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<MaintenanceRequestDetail>, AppError> {
    let request = app_state.maintenance_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(request))
}

#[utoipa::path(
    post,
    path = "/api/maintenance",
    tag = "Maintenance",
    request_body = CreateMaintenancePayload,
    responses(
        (status = 201, description = "Requisição aberta", body = MaintenanceRequest),
        (status = 400, description = "Sem equipamento nem centro de trabalho"),
        (status = 404, description = "Equipamento/centro de trabalho não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    AppJson(payload): AppJson<CreateMaintenancePayload>,
) -> Result<ApiResponse<MaintenanceRequest>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state.maintenance_service.create(payload, user.id).await?;
    Ok(ApiResponse::created(request).with_message("Maintenance request created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/maintenance/{id}",
    tag = "Maintenance",
    request_body = UpdateMaintenancePayload,
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição atualizada", body = MaintenanceRequest),
        (status = 400, description = "Transição de status não permitida"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_request(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateMaintenancePayload>,
) -> Result<ApiResponse<MaintenanceRequest>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state.maintenance_service.update(id, payload).await?;
    Ok(ApiResponse::ok(request).with_message("Maintenance request updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/maintenance/{id}",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição removida"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_request(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.maintenance_service.delete(id).await?;
    Ok(ApiResponse::message("Maintenance request deleted successfully"))
}

// Colunas do kanban: estágio <-> status
#[utoipa::path(
    get,
    path = "/api/maintenance/stages",
    tag = "Maintenance",
    responses((status = 200, description = "Tabela de estágios", body = [StageInfo])),
    security(("api_jwt" = []))
)]
pub async fn list_stages() -> ApiResponse<Vec<StageInfo>> {
    ApiResponse::ok(StageInfo::table())
}
