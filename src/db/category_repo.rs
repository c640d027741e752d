// src/db/category_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{db_utils::map_write_error, error::AppError},
    db::{set, update_builder},
    models::{
        category::{CategoryDetail, CreateCategoryPayload, EquipmentCategory, UpdateCategoryPayload},
        scope::CompanyScope,
    },
};

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CategoryDetail>, AppError>;
    async fn find(&self, id: Uuid) -> Result<Option<CategoryDetail>, AppError>;
    async fn create(&self, payload: CreateCategoryPayload) -> Result<EquipmentCategory, AppError>;
    async fn update(&self, id: Uuid, payload: UpdateCategoryPayload) -> Result<Option<EquipmentCategory>, AppError>;
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<EquipmentCategory>, AppError>;
}

#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const DETAIL_SELECT: &str = r#"
    SELECT
        cat.*,
        co.name AS company_name,
        u.full_name AS responsible_user_name,
        u.email AS responsible_user_email
    FROM equipment_categories cat
    LEFT JOIN companies co ON co.id = cat.company_id
    LEFT JOIN users u ON u.id = cat.responsible_user_id
"#;

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list(&self, scope: CompanyScope) -> Result<Vec<CategoryDetail>, AppError> {
        let sql = format!(
            "{DETAIL_SELECT} WHERE ($1::uuid IS NULL OR cat.company_id = $1) ORDER BY cat.created_at DESC"
        );
        let categories = sqlx::query_as::<_, CategoryDetail>(&sql)
            .bind(scope.company_id())
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CategoryDetail>, AppError> {
        let sql = format!("{DETAIL_SELECT} WHERE cat.id = $1");
        let category = sqlx::query_as::<_, CategoryDetail>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(category)
    }

    async fn create(&self, payload: CreateCategoryPayload) -> Result<EquipmentCategory, AppError> {
        sqlx::query_as::<_, EquipmentCategory>(
            r#"
            INSERT INTO equipment_categories (name, description, company_id, responsible_user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(payload.name)
        .bind(payload.description)
        .bind(payload.company_id)
        .bind(payload.responsible_user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, payload: UpdateCategoryPayload) -> Result<Option<EquipmentCategory>, AppError> {
        let mut qb = update_builder("equipment_categories");
        set(&mut qb, "name", payload.name);
        set(&mut qb, "description", payload.description);
        set(&mut qb, "responsible_user_id", payload.responsible_user_id);
        qb.push(" WHERE id = ").push_bind(id).push(" RETURNING *");

        qb.build_query_as::<EquipmentCategory>()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM equipment_categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_plain(&self, scope: CompanyScope) -> Result<Vec<EquipmentCategory>, AppError> {
        let categories = sqlx::query_as::<_, EquipmentCategory>(
            "SELECT * FROM equipment_categories WHERE ($1::uuid IS NULL OR company_id = $1) ORDER BY name ASC",
        )
        .bind(scope.company_id())
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }
}
