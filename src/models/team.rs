// src/models/team.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::serde_helpers::nullable;

pub const DEFAULT_MEMBER_ROLE: &str = "member";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTeam {
    pub id: Uuid,
    #[schema(example = "Equipe Mecânica")]
    pub name: String,
    pub description: Option<String>,
    pub company_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: Uuid,
    pub team_id: Uuid,
    pub user_id: Uuid,
    #[schema(example = "technician")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Membro + dados do usuário
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamMemberDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub member: TeamMember,
    pub full_name: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: MaintenanceTeam,
    pub company_name: Option<String>,
    pub members: Vec<TeamMemberDetail>,
}

// Linha intermediária da listagem (membros são anexados depois)
#[derive(Debug, Clone, FromRow)]
pub struct TeamWithCompany {
    #[sqlx(flatten)]
    pub team: MaintenanceTeam,
    pub company_name: Option<String>,
}

impl TeamWithCompany {
    pub fn with_members(self, members: Vec<TeamMemberDetail>) -> TeamDetail {
        TeamDetail { team: self.team, company_name: self.company_name, members }
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamPayload {
    #[validate(length(min = 1, message = "Team name is required"))]
    pub name: String,
    pub description: Option<String>,
    pub company_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTeamPayload {
    #[validate(length(min = 1, message = "Team name cannot be empty"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

fn default_member_role() -> String {
    DEFAULT_MEMBER_ROLE.to_string()
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberPayload {
    pub user_id: Uuid,
    #[serde(default = "default_member_role")]
    #[validate(length(min = 1, message = "Role cannot be empty"))]
    #[schema(example = "member")]
    pub role: String,
}
