// src/db/equipment_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        equipment::{CreateEquipmentPayload, Equipment, EquipmentDetail, UpdateEquipmentPayload},
        scope::CompanyScope,
    },
};

#[async_trait]
pub trait EquipmentRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<EquipmentDetail>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<EquipmentDetail>, AppError>;
    async fn create(&self, payload: CreateEquipmentPayload) -> Result<Equipment, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateEquipmentPayload) -> Result<Option<Equipment>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct PgEquipmentRepository {
    pool: PgPool,
}

impl PgEquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Equipamento + categoria, empresa, centro de trabalho, equipe e técnico
const DETAIL_SELECT: &str = r#"
    SELECT
        e.*,
        cat.name AS category_name,
        co.name AS company_name,
        wc.name AS work_center_name,
        t.name AS team_name,
        tech.full_name AS technician_name
    FROM equipment e
    LEFT JOIN equipment_categories cat ON cat.id = e.category_id
    LEFT JOIN companies co ON co.id = e.company_id
    LEFT JOIN work_centers wc ON wc.id = e.work_center_id
    LEFT JOIN maintenance_teams t ON t.id = e.maintenance_team_id
    LEFT JOIN users tech ON tech.id = e.technician_user_id
"#;

#[async_trait]
impl EquipmentRepository for PgEquipmentRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<EquipmentDetail>, AppError> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE ($1::uuid IS NULL OR e.company_id = $1) ORDER BY e.created_at DESC"
        );
        let equipment = sqlx::query_as::<_, EquipmentDetail>(&sql)
            .bind(scope.company_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(equipment)
    }

    async fn find(&self, id: Uuid) -> Result<Option<EquipmentDetail>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE e.id = $1");
        let equipment = sqlx::query_as::<_, EquipmentDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(equipment)
    }

    async fn create(&self, payload: CreateEquipmentPayload) -> Result<Equipment, AppError> {
        sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment (
                name, description, serial_number, model, manufacturer,
                purchase_date, warranty_expiry, status, health_percentage,
                company_id, category_id, work_center_id, department, location,
                used_by_user_id, technician_user_id, maintenance_team_id,
                assigned_date, scrap_date
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, COALESCE($9, 100),
                $10, $11, $12, $13, $14, $15, $16, $17, $18, $19
            )
            RETURNING *
            "#,
        )
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.serial_number)
        .bind(payload.model)
        .bind(payload.manufacturer)
        .bind(payload.purchase_date)
        .bind(payload.warranty_expiry)
        .bind(payload.status)
        .bind(payload.health_percentage)
        .bind(payload.company_id)
        .bind(payload.category_id)
        .bind(payload.work_center_id)
        .bind(payload.department)
        .bind(payload.location)
        .bind(payload.used_by_user_id)
        .bind(payload.technician_user_id)
        .bind(payload.maintenance_team_id)
        .bind(payload.assigned_date)
        .bind(payload.scrap_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, payload: UpdateEquipmentPayload) -> Result<Option<Equipment>, AppError> {
        let mut qb = update_builder("equipment");
        set(&mut qb, "name", payload.name);
        set(&mut qb, "description", payload.description);
        set(&mut qb, "serial_number", payload.serial_number);
        set(&mut qb, "model", payload.model);
        set(&mut qb, "manufacturer", payload.manufacturer);
        set(&mut qb, "purchase_date", payload.purchase_date);
        set(&mut qb, "warranty_expiry", payload.warranty_expiry);
        set(&mut qb, "status", payload.status);
        set(&mut qb, "health_percentage", payload.health_percentage);
        set(&mut qb, "category_id", payload.category_id);
        set(&mut qb, "work_center_id", payload.work_center_id);
        set(&mut qb, "department", payload.department);
        set(&mut qb, "location", payload.location);
        set(&mut qb, "used_by_user_id", payload.used_by_user_id);
        set(&mut qb, "technician_user_id", payload.technician_user_id);
        set(&mut qb, "maintenance_team_id", payload.maintenance_team_id);
        set(&mut qb, "assigned_date", payload.assigned_date);
        set(&mut qb, "scrap_date", payload.scrap_date);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<Equipment>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
