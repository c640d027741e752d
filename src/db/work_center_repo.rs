// src/db/work_center_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        scope::CompanyScope,
        work_center::{CreateWorkCenterPayload, UpdateWorkCenterPayload, WorkCenter, WorkCenterDetail},
    },
};

#[async_trait]
pub trait WorkCenterRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<WorkCenterDetail>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<WorkCenterDetail>, AppError>;
    async fn create(&self, payload: CreateWorkCenterPayload) -> Result<WorkCenter, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateWorkCenterPayload) -> Result<Option<WorkCenter>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<WorkCenter>, AppError>;
}

#[derive(Clone)]
pub struct PgWorkCenterRepository {
    pool: PgPool,
}

impl PgWorkCenterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkCenterRepository for PgWorkCenterRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<WorkCenterDetail>, AppError> {
        let work_centers = sqlx::query_as::<_, WorkCenterDetail>(
            r#"
            SELECT wc.*, co.name AS company_name
            FROM work_centers wc
            LEFT JOIN companies co ON co.id = wc.company_id
            WHERE ($1::uuid IS NULL OR wc.company_id = $1)
            ORDER BY wc.created_at DESC
            "#,
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(work_centers)
    }

    async fn find(&self, id: Uuid) -> Result<Option<WorkCenterDetail>, AppError> {
        let work_center = sqlx::query_as::<_, WorkCenterDetail>(
            r#"
            SELECT wc.*, co.name AS company_name
            FROM work_centers wc
            LEFT JOIN companies co ON co.id = wc.company_id
            WHERE wc.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(work_center)
    }

    async fn create(&self, payload: CreateWorkCenterPayload) -> Result<WorkCenter, AppError> {
        sqlx::query_as::<_, WorkCenter>(
            r#"
            INSERT INTO work_centers (
                name, code, tag, alternative_work_centers,
                cost_per_hour, capacity, time_efficiency, oee_target,
                location, description, company_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(payload.name)
        .bind(payload.code)
        .bind(payload.tag)
        .bind(payload.alternative_work_centers)
        .bind(payload.cost_per_hour)
        .bind(payload.capacity)
        .bind(payload.time_efficiency)
        .bind(payload.oee_target)
        .bind(payload.location)
        .bind(payload.description)
        .bind(payload.company_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, payload: UpdateWorkCenterPayload) -> Result<Option<WorkCenter>, AppError> {
        let mut qb = update_builder("work_centers");
        set(&mut qb, "name", payload.name);
        set(&mut qb, "code", payload.code);
        set(&mut qb, "tag", payload.tag);
        set(&mut qb, "alternative_work_centers", payload.alternative_work_centers);
        set(&mut qb, "cost_per_hour", payload.cost_per_hour);
        set(&mut qb, "capacity", payload.capacity);
        set(&mut qb, "time_efficiency", payload.time_efficiency);
        set(&mut qb, "oee_target", payload.oee_target);
        set(&mut qb, "location", payload.location);
        set(&mut qb, "description", payload.description);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<WorkCenter>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM work_centers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<WorkCenter>, AppError> {
        let work_centers = sqlx::query_as::<_, WorkCenter>(
            "SELECT * FROM work_centers WHERE ($1::uuid IS NULL OR company_id = $1) ORDER BY name ASC",
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(work_centers)
    }
}
