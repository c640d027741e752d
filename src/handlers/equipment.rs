// src/handlers/equipment.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    models::{
        equipment::{CreateEquipmentPayload, Equipment, EquipmentDetail, UpdateEquipmentPayload},
        scope::CompanyScope,
    },
};

// GET /api/equipment
#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "Equipment",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Equipamentos com relações resolvidas", body = [EquipmentDetail]),
        (status = 400, description = "companyId inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_equipment(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<EquipmentDetail>>, AppError> {
    let equipment = app_state.equipment_service.get_all(scope).await?;
    Ok(ApiResponse::ok(equipment))
}

#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Equipamento", body = EquipmentDetail),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<EquipmentDetail>, AppError> {
    let equipment = app_state.equipment_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(equipment))
}

#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "Equipment",
    request_body = CreateEquipmentPayload,
    responses(
        (status = 201, description = "Equipamento criado", body = Equipment),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Empresa/categoria/equipe inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateEquipmentPayload>,
) -> Result<ApiResponse<Equipment>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let equipment = app_state.equipment_service.create(payload).await?;
    Ok(ApiResponse::created(equipment).with_message("Equipment created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    request_body = UpdateEquipmentPayload,
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Equipamento atualizado", body = Equipment),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateEquipmentPayload>,
) -> Result<ApiResponse<Equipment>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let equipment = app_state.equipment_service.update(id, payload).await?;
    Ok(ApiResponse::ok(equipment).with_message("Equipment updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Equipamento removido"),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.equipment_service.delete(id).await?;
    Ok(ApiResponse::message("Equipment deleted successfully"))
}
