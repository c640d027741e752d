// src/db.rs

use std::{sync::Arc, time::Duration};

use sqlx::{Encode, PgPool, Postgres, QueryBuilder, Type, postgres::PgPoolOptions};

use crate::config::Config;

pub mod category_repo;
pub mod company_repo;
pub mod dashboard_repo;
pub mod equipment_repo;
pub mod maintenance_repo;
pub mod team_repo;
pub mod user_repo;
pub mod work_center_repo;

#[cfg(test)]
pub mod memory;

pub use category_repo::{CategoryRepository, PgCategoryRepository};
pub use company_repo::{CompanyRepository, PgCompanyRepository};
pub use dashboard_repo::{DashboardRepository, PgDashboardRepository};
pub use equipment_repo::{EquipmentRepository, PgEquipmentRepository};
pub use maintenance_repo::{MaintenanceRepository, PgMaintenanceRepository};
pub use team_repo::{PgTeamRepository, TeamRepository};
pub use user_repo::{PgUserRepository, UserRepository};
pub use work_center_repo::{PgWorkCenterRepository, WorkCenterRepository};

/// Abre a pool de conexões com o Postgres.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(&config.database_url)
        .await?;

    tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");
    Ok(pool)
}

// Todos os repositórios da aplicação, prontos para injetar nos serviços.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub companies: Arc<dyn CompanyRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub work_centers: Arc<dyn WorkCenterRepository>,
    pub equipment: Arc<dyn EquipmentRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
    pub dashboard: Arc<dyn DashboardRepository>,
}

impl Repositories {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            companies: Arc::new(PgCompanyRepository::new(pool.clone())),
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            work_centers: Arc::new(PgWorkCenterRepository::new(pool.clone())),
            equipment: Arc::new(PgEquipmentRepository::new(pool.clone())),
            teams: Arc::new(PgTeamRepository::new(pool.clone())),
            maintenance: Arc::new(PgMaintenanceRepository::new(pool.clone())),
            dashboard: Arc::new(PgDashboardRepository::new(pool)),
        }
    }
}

// ---
// Helpers para UPDATE parcial com QueryBuilder
// ---

/// Começa um `UPDATE <table> SET updated_at = NOW()`; cada `set` acrescenta uma coluna.
pub(crate) fn update_builder(table: &str) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE ");
    qb.push(table).push(" SET updated_at = NOW()");
    qb
}

/// Acrescenta `, column = $n` somente quando o valor foi enviado.
pub(crate) fn set<T>(qb: &mut QueryBuilder<'static, Postgres>, column: &str, value: Option<T>)
where
    T: 'static + Encode<'static, Postgres> + Type<Postgres> + Send,
{
    if let Some(value) = value {
        qb.push(", ").push(column).push(" = ").push_bind(value);
    }
}
