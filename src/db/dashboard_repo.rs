// src/db/dashboard_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::{dashboard::RequestSample, maintenance::RequestStatus, scope::CompanyScope},
};

// Consultas de agregação do dashboard. Cada método é uma contagem
// independente, para o serviço disparar todas em paralelo.
#[async_trait]
pub trait DashboardRepository: Send + Sync {
    async fn count_equipment(&self, scope: CompanyScope) -> Result<i64, AppError>;
    /// Equipamentos com `health_percentage < threshold`.
    async fn count_critical_equipment(&self, scope: CompanyScope, threshold: i32) -> Result<i64, AppError>;
    /// `None` conta todos os pedidos.
    async fn count_requests(&self, scope: CompanyScope, status: Option<RequestStatus>) -> Result<i64, AppError>;
    /// Abertos (nem completed nem cancelled) e agendados antes de `now`.
    async fn count_overdue(&self, scope: CompanyScope, now: DateTime<Utc>) -> Result<i64, AppError>;
    async fn count_teams(&self, scope: CompanyScope) -> Result<i64, AppError>;
    /// Linhas de team_members (não usuários distintos), filtradas pela empresa da equipe.
    async fn count_technicians(&self, scope: CompanyScope) -> Result<i64, AppError>;
    async fn request_samples(&self, scope: CompanyScope, since: DateTime<Utc>) -> Result<Vec<RequestSample>, AppError>;
}

#[derive(Clone)]
pub struct PgDashboardRepository {
    pool: PgPool,
}

impl PgDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PgDashboardRepository {
    async fn count_equipment(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM equipment WHERE ($1::uuid IS NULL OR company_id = $1)",
        )
        .bind(scope.company_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_critical_equipment(&self, scope: CompanyScope, threshold: i32) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM equipment
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND health_percentage < $2
            "#,
        )
        .bind(scope.company_id())
        .bind(threshold)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_requests(&self, scope: CompanyScope, status: Option<RequestStatus>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND ($2::request_status IS NULL OR status = $2)
            "#,
        )
        .bind(scope.company_id())
        .bind(status)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_overdue(&self, scope: CompanyScope, now: DateTime<Utc>) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND status NOT IN ('completed', 'cancelled')
              AND scheduled_date < $2
            "#,
        )
        .bind(scope.company_id())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_teams(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM maintenance_teams WHERE ($1::uuid IS NULL OR company_id = $1)",
        )
        .bind(scope.company_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn count_technicians(&self, scope: CompanyScope) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM team_members tm
            INNER JOIN maintenance_teams t ON t.id = tm.team_id
            WHERE ($1::uuid IS NULL OR t.company_id = $1)
            "#,
        )
        .bind(scope.company_id())
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn request_samples(&self, scope: CompanyScope, since: DateTime<Utc>) -> Result<Vec<RequestSample>, AppError> {
        let samples = sqlx::query_as::<_, RequestSample>(
            r#"
            SELECT status, request_type, created_at
            FROM maintenance_requests
            WHERE ($1::uuid IS NULL OR company_id = $1)
              AND created_at >= $2
            ORDER BY created_at ASC
            "#,
        )
        .bind(scope.company_id())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(samples)
    }
}
