// src/handlers/category.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    models::{
        category::{CategoryDetail, CreateCategoryPayload, EquipmentCategory, UpdateCategoryPayload},
        scope::CompanyScope,
    },
};

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Categories",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Categorias", body = [CategoryDetail]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<CategoryDetail>>, AppError> {
    let categories = app_state.category_service.get_all(scope).await?;
    Ok(ApiResponse::ok(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria", body = CategoryDetail),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<CategoryDetail>, AppError> {
    let category = app_state.category_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(category))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = EquipmentCategory),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Empresa ou responsável inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateCategoryPayload>,
) -> Result<ApiResponse<EquipmentCategory>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state.category_service.create(payload).await?;
    Ok(ApiResponse::created(category).with_message("Category created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Categories",
    request_body = UpdateCategoryPayload,
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria atualizada", body = EquipmentCategory),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateCategoryPayload>,
) -> Result<ApiResponse<EquipmentCategory>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let category = app_state.category_service.update(id, payload).await?;
    Ok(ApiResponse::ok(category).with_message("Category updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria removida"),
        (status = 404, description = "Categoria não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.category_service.delete(id).await?;
    Ok(ApiResponse::message("Category deleted successfully"))
}
