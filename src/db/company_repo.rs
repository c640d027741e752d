// src/db/company_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        company::{Company, CompanyDetail, CompanyMember, CompanyOverview, CreateCompanyPayload, UpdateCompanyPayload},
        scope::CompanyScope,
    },
};

pub const OWNER_ROLE: &str = "owner";

#[async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CompanyOverview>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<CompanyDetail>, AppError>;
    /// Cria a empresa e vincula `owner_id` como "owner", atomicamente.
    async fn create_with_owner(&self, payload: CreateCompanyPayload, owner_id: Uuid) -> Result<Company, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateCompanyPayload) -> Result<Option<Company>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    async fn list_plain(&self) -> Result<Vec<Company>, AppError>;
}

#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CompanyOverview>, AppError> {
        let companies = sqlx::query_as::<_, CompanyOverview>(
            r#"
            SELECT
                c.*,
                (SELECT COUNT(*) FROM user_companies uc WHERE uc.company_id = c.id) AS user_count,
                (SELECT COUNT(*) FROM equipment e WHERE e.company_id = c.id) AS equipment_count,
                (SELECT COUNT(*) FROM maintenance_teams t WHERE t.company_id = c.id) AS team_count
            FROM companies c
            WHERE ($1::uuid IS NULL OR c.id = $1)
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CompanyDetail>, AppError> {
        let Some(company) = sqlx::query_as::<_, Company>("SELECT * FROM companies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let members = sqlx::query_as::<_, CompanyMember>(
            r#"
            SELECT u.id AS user_id, u.email, u.full_name, uc.role, uc.created_at AS joined_at
            FROM user_companies uc
            INNER JOIN users u ON u.id = uc.user_id
            WHERE uc.company_id = $1
            ORDER BY uc.created_at ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(CompanyDetail { company, members }))
    }

    async fn create_with_owner(&self, payload: CreateCompanyPayload, owner_id: Uuid) -> Result<Company, AppError> {
        // 1. Inicia a transação
        let mut tx = self.pool.begin().await?;

        // 2. Cria a empresa
        let company = sqlx::query_as::<_, Company>(
            "INSERT INTO companies (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(payload.name)
        .bind(payload.description)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        // 3. Vincula o criador como dono
        sqlx::query("INSERT INTO user_companies (user_id, company_id, role) VALUES ($1, $2, $3)")
            .bind(owner_id)
            .bind(company.id)
            .bind(OWNER_ROLE)
            .execute(&mut *tx)
            .await
            .map_err(map_write_error)?;

        tx.commit().await?;
        Ok(company)
    }

    async fn update(&self, id: Uuid, payload: UpdateCompanyPayload) -> Result<Option<Company>, AppError> {
        let mut qb = update_builder("companies");
        set(&mut qb, "name", payload.name);
        set(&mut qb, "description", payload.description);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Company>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_plain(&self) -> Result<Vec<Company>, AppError> {
        let companies = sqlx::query_as::<_, Company>("SELECT * FROM companies ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(companies)
    }
}
