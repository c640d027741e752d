// src/db/team_repo.rs

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        scope::CompanyScope,
        team::{
            CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamMemberDetail, TeamWithCompany,
            UpdateTeamPayload,
        },
    },
};

#[async_trait]
pub trait TeamRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<TeamDetail>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<TeamDetail>, AppError>;
    async fn create(&self, payload: CreateTeamPayload) -> Result<MaintenanceTeam, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateTeamPayload) -> Result<Option<MaintenanceTeam>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    /// Equipe ou usuário inexistente -> `InvalidReference`. Duplicatas são aceitas.
    async fn add_member(&self, team_id: Uuid, user_id: Uuid, role: String) -> Result<TeamMemberDetail, AppError>;
    /// Remove pelo id do vínculo; `false` se não existir nessa equipe.
    async fn remove_member(&self, team_id: Uuid, member_id: Uuid) -> Result<bool, AppError>;
    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<MaintenanceTeam>, AppError>;
}

#[derive(Clone)]
pub struct PgTeamRepository {
    pool: PgPool,
}

impl PgTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn members_of(&self, team_ids: &[Uuid]) -> Result<HashMap<Uuid, Vec<TeamMemberDetail>>, AppError> {
        let rows = sqlx::query_as::<_, TeamMemberDetail>(
            r#"
            SELECT tm.*, u.full_name, u.email
            FROM team_members tm
            INNER JOIN users u ON u.id = tm.user_id
            WHERE tm.team_id = ANY($1)
            ORDER BY tm.created_at ASC
            "#,
        )
        .bind(team_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<TeamMemberDetail>> = HashMap::new();
        for member in rows {
            grouped.entry(member.member.team_id).or_default().push(member);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl TeamRepository for PgTeamRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<TeamDetail>, AppError> {
        let teams = sqlx::query_as::<_, TeamWithCompany>(
            r#"
            SELECT t.*, co.name AS company_name
            FROM maintenance_teams t
            LEFT JOIN companies co ON co.id = t.company_id
            WHERE ($1::uuid IS NULL OR t.company_id = $1)
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = teams.iter().map(|t| t.team.id).collect();
        let mut members = self.members_of(&ids).await?;

        Ok(teams
            .into_iter()
            .map(|t| {
                let team_members = members.remove(&t.team.id).unwrap_or_default();
                t.with_members(team_members)
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> Result<Option<TeamDetail>, AppError> {
        let Some(team) = sqlx::query_as::<_, TeamWithCompany>(
            r#"
            SELECT t.*, co.name AS company_name
            FROM maintenance_teams t
            LEFT JOIN companies co ON co.id = t.company_id
            WHERE t.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        else {
            return Ok(None);
        };

        let members = self.members_of(&[id]).await?.remove(&id).unwrap_or_default();
        Ok(Some(team.with_members(members)))
    }

    async fn create(&self, payload: CreateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        sqlx::query_as::<_, MaintenanceTeam>(
            "INSERT INTO maintenance_teams (name, description, company_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, payload: UpdateTeamPayload) -> Result<Option<MaintenanceTeam>, AppError> {
        let mut qb = update_builder("maintenance_teams");
        set(&mut qb, "name", payload.name);
        set(&mut qb, "description", payload.description);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<MaintenanceTeam>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_teams WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn add_member(&self, team_id: Uuid, user_id: Uuid, role: String) -> Result<TeamMemberDetail, AppError> {
        // O INSERT e a leitura do usuário saem numa única ida ao banco
        sqlx::query_as::<_, TeamMemberDetail>(
            r#"
            WITH inserted AS (
                INSERT INTO team_members (team_id, user_id, role)
                VALUES ($1, $2, $3)
                RETURNING *
            )
            SELECT inserted.*, u.full_name, u.email
            FROM inserted
            INNER JOIN users u ON u.id = inserted.user_id
            "#,
        )
        .bind(team_id)
        .bind(user_id)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn remove_member(&self, team_id: Uuid, member_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM team_members WHERE id = $1 AND team_id = $2")
            .bind(member_id)
            .bind(team_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<MaintenanceTeam>, AppError> {
        let teams = sqlx::query_as::<_, MaintenanceTeam>(
            "SELECT * FROM maintenance_teams WHERE ($1::uuid IS NULL OR company_id = $1) ORDER BY name ASC",
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(teams)
    }
}
