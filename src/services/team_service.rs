// src/services/team_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::TeamRepository,
    models::{
        scope::CompanyScope,
        team::{AddMemberPayload, CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamMemberDetail, UpdateTeamPayload},
    },
};

#[derive(Clone)]
pub struct TeamService {
    team_repo: Arc<dyn TeamRepository>,
}

impl TeamService {
    pub fn new(team_repo: Arc<dyn TeamRepository>) -> Self {
        Self { team_repo }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<TeamDetail>, AppError> {
        self.team_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<TeamDetail, AppError> {
        self.team_repo.find(id).await?.ok_or(AppError::NotFound("Team"))
    }

    pub async fn create(&self, payload: CreateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        let team = self.team_repo.create(payload).await?;
        tracing::info!(team_id = %team.id, company_id = %team.company_id, "Equipe criada");
        Ok(team)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        let team = self
            .team_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Team"))?;
        tracing::info!(team_id = %id, "Equipe atualizada");
        Ok(team)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.team_repo.delete(id).await? {
            return Err(AppError::NotFound("Team"));
        }
        tracing::info!(team_id = %id, "Equipe removida");
        Ok(())
    }

    pub async fn add_member(&self, team_id: Uuid, payload: AddMemberPayload) -> Result<TeamMemberDetail, AppError> {
        let member = self
            .team_repo
            .add_member(team_id, payload.user_id, payload.role)
            .await?;
        tracing::info!(team_id = %team_id, member_id = %member.member.id, user_id = %payload.user_id, "Membro adicionado");
        Ok(member)
    }

    pub async fn remove_member(&self, team_id: Uuid, member_id: Uuid) -> Result<(), AppError> {
        if !self.team_repo.remove_member(team_id, member_id).await? {
            return Err(AppError::NotFound("Team member"));
        }
        tracing::info!(team_id = %team_id, member_id = %member_id, "Membro removido");
        Ok(())
    }
}
