// src/db/maintenance_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        maintenance::{MaintenanceRequest, MaintenanceRequestDetail, NewMaintenanceRequest, UpdateMaintenancePayload},
        scope::CompanyScope,
    },
};

#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<MaintenanceRequestDetail>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<MaintenanceRequestDetail>, AppError>;
    async fn create(&self, request: NewMaintenanceRequest) -> Result<MaintenanceRequest, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateMaintenancePayload) -> Result<Option<MaintenanceRequest>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    /// Os `limit` pedidos mais recentes (feed do dashboard).
    async fn recent(&self, scope: CompanyScope, limit: i64) -> Result<Vec<MaintenanceRequestDetail>, AppError>;
}

#[derive(Clone)]
pub struct PgMaintenanceRepository {
    pool: PgPool,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Categoria/empresa do próprio pedido; sem elas, as do equipamento.
const DETAIL_SELECT: &str = r#"
    SELECT
        r.*,
        e.name AS equipment_name,
        wc.name AS work_center_name,
        COALESCE(cat.name, ecat.name) AS category_name,
        COALESCE(co.name, eco.name) AS company_name,
        t.name AS team_name,
        requester.full_name AS requested_by_name,
        assignee.full_name AS assigned_to_name
    FROM maintenance_requests r
    LEFT JOIN equipment e ON e.id = r.equipment_id
    LEFT JOIN work_centers wc ON wc.id = r.work_center_id
    LEFT JOIN equipment_categories cat ON cat.id = r.category_id
    LEFT JOIN companies co ON co.id = r.company_id
    LEFT JOIN equipment_categories ecat ON ecat.id = e.category_id
    LEFT JOIN companies eco ON eco.id = e.company_id
    LEFT JOIN maintenance_teams t ON t.id = r.team_id
    LEFT JOIN users requester ON requester.id = r.requested_by_id
    LEFT JOIN users assignee ON assignee.id = r.assigned_to_id
"#;

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE ($1::uuid IS NULL OR r.company_id = $1) ORDER BY r.created_at DESC"
        );
        let requests = sqlx::query_as::<_, MaintenanceRequestDetail>(&sql)
            .bind(scope.company_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    async fn find(&self, id: Uuid) -> Result<Option<MaintenanceRequestDetail>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE r.id = $1");
        let request = sqlx::query_as::<_, MaintenanceRequestDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(request)
    }

    async fn create(&self, request: NewMaintenanceRequest) -> Result<MaintenanceRequest, AppError> {
        sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests (
                title, description, priority, status, request_type,
                scheduled_date, completed_date, equipment_id, work_center_id,
                company_id, category_id, requested_by_id, assigned_to_id, team_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(request.title)
        .bind(request.description)
        .bind(request.priority)
        .bind(request.status)
        .bind(request.request_type)
        .bind(request.scheduled_date)
        .bind(request.completed_date)
        .bind(request.equipment_id)
        .bind(request.work_center_id)
        .bind(request.company_id)
        .bind(request.category_id)
        .bind(request.requested_by_id)
        .bind(request.assigned_to_id)
        .bind(request.team_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, payload: UpdateMaintenancePayload) -> Result<Option<MaintenanceRequest>, AppError> {
        let mut qb = update_builder("maintenance_requests");
        set(&mut qb, "title", payload.title);
        set(&mut qb, "description", payload.description);
        set(&mut qb, "priority", payload.priority);
        set(&mut qb, "status", payload.status);
        set(&mut qb, "request_type", payload.request_type);
        set(&mut qb, "scheduled_date", payload.scheduled_date);
        set(&mut qb, "completed_date", payload.completed_date);
        set(&mut qb, "equipment_id", payload.equipment_id);
        set(&mut qb, "work_center_id", payload.work_center_id);
        set(&mut qb, "category_id", payload.category_id);
        set(&mut qb, "assigned_to_id", payload.assigned_to_id);
        set(&mut qb, "team_id", payload.team_id);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<MaintenanceRequest>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM maintenance_requests WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn recent(&self, scope: CompanyScope, limit: i64) -> Result<Vec<MaintenanceRequestDetail>, AppError> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE ($1::uuid IS NULL OR r.company_id = $1) ORDER BY r.created_at DESC LIMIT $2"
        );
        let requests = sqlx::query_as::<_, MaintenanceRequestDetail>(&sql)
            .bind(scope.company_id())
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }
}
