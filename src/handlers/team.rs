// src/handlers/team.rs

use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    models::{
        scope::CompanyScope,
        team::{
            AddMemberPayload, CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamMemberDetail,
            UpdateTeamPayload,
        },
    },
};

#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "Teams",
    params(
        ("companyId" = Option<Uuid>, Query, description = "Filtra por empresa"),
        ("x-company-id" = Option<Uuid>, Header, description = "Alternativa ao companyId")
    ),
    responses(
        (status = 200, description = "Equipes com membros", body = [TeamDetail]),
        (status = 400, description = "companyId inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_teams(
    State(app_state): State<AppState>,
    scope: CompanyScope,
) -> Result<ApiResponse<Vec<TeamDetail>>, AppError> {
    let teams = app_state.team_service.get_all(scope).await?;
    Ok(ApiResponse::ok(teams))
}

#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    tag = "Teams",
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 200, description = "Equipe", body = TeamDetail),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_team(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<TeamDetail>, AppError> {
    let team = app_state.team_service.get_by_id(id).await?;
    Ok(ApiResponse::ok(team))
}

#[utoipa::path(
    post,
    path = "/api/teams",
    tag = "Teams",
    request_body = CreateTeamPayload,
    responses(
        (status = 201, description = "Equipe criada", body = MaintenanceTeam),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "Empresa inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_team(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<CreateTeamPayload>,
) -> Result<ApiResponse<MaintenanceTeam>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let team = app_state.team_service.create(payload).await?;
    Ok(ApiResponse::created(team).with_message("Team created successfully"))
}

#[utoipa::path(
    put,
    path = "/api/teams/{id}",
    tag = "Teams",
    request_body = UpdateTeamPayload,
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 200, description = "Equipe atualizada", body = MaintenanceTeam),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_team(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateTeamPayload>,
) -> Result<ApiResponse<MaintenanceTeam>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let team = app_state.team_service.update(id, payload).await?;
    Ok(ApiResponse::ok(team).with_message("Team updated successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}",
    tag = "Teams",
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 200, description = "Equipe removida"),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_team(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.team_service.delete(id).await?;
    Ok(ApiResponse::message("Team deleted successfully"))
}

// --- Membros ---

#[utoipa::path(
    post,
    path = "/api/teams/{id}/members",
    tag = "Teams",
    request_body = AddMemberPayload,
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 201, description = "Membro adicionado", body = TeamMemberDetail),
        (status = 404, description = "Equipe não encontrada"),
        (status = 409, description = "Usuário inexistente")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_team_member(
    State(app_state): State<AppState>,
    Path(team_id): Path<Uuid>,
    AppJson(payload): AppJson<AddMemberPayload>,
) -> Result<ApiResponse<TeamMemberDetail>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let member = app_state.team_service.add_member(team_id, payload).await?;
    Ok(ApiResponse::created(member).with_message("Member added successfully"))
}

#[utoipa::path(
    delete,
    path = "/api/teams/{id}/members/{memberId}",
    tag = "Teams",
    params(
        ("id" = Uuid, Path, description = "ID da equipe"),
        ("memberId" = Uuid, Path, description = "ID do vínculo de membro")
    ),
    responses(
        (status = 200, description = "Membro removido"),
        (status = 404, description = "Membro não encontrado nesta equipe")
    ),
    security(("api_jwt" = []))
)]
pub async fn remove_team_member(
    State(app_state): State<AppState>,
    Path((team_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<ApiResponse<()>, AppError> {
    app_state.team_service.remove_member(team_id, member_id).await?;
    Ok(ApiResponse::message("Member removed successfully"))
}
