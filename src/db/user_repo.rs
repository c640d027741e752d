// src/db/user_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    models::auth::{CompanyMembership, NewUser, User, UserSummary},
};

// Tudo que envolve a tabela 'users' (e os vínculos com empresas)
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    /// Falha com `EmailAlreadyExists` se o e-mail já estiver em uso.
    async fn create(&self, user: NewUser) -> Result<User, AppError>;
    async fn memberships(&self, user_id: Uuid) -> Result<Vec<CompanyMembership>, AppError>;
    async fn list_summaries(&self) -> Result<Vec<UserSummary>, AppError>;
}

#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let maybe_user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(maybe_user)
    }

    async fn create(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash, full_name)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(user.email)
        .bind(user.password_hash)
        .bind(user.full_name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn memberships(&self, user_id: Uuid) -> Result<Vec<CompanyMembership>, AppError> {
        let companies = sqlx::query_as::<_, CompanyMembership>(
            r#"
            SELECT
                c.id AS company_id,
                c.name AS company_name,
                uc.role,
                uc.created_at AS joined_at
            FROM user_companies uc
            INNER JOIN companies c ON c.id = uc.company_id
            WHERE uc.user_id = $1
            ORDER BY uc.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(companies)
    }

    async fn list_summaries(&self) -> Result<Vec<UserSummary>, AppError> {
        let users = sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, full_name FROM users ORDER BY full_name ASC NULLS LAST, email ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }
}
