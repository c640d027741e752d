// src/config.rs

use std::{env, str::FromStr, sync::Arc};

use anyhow::Context;
use sqlx::PgPool;

use crate::{
    db::Repositories,
    services::{
        auth::AuthService, category_service::CategoryService, company_service::CompanyService,
        dashboard_service::DashboardService, equipment_service::EquipmentService,
        maintenance_service::MaintenanceService, resource_service::ResourceService,
        team_service::TeamService, work_center_service::WorkCenterService,
    },
};

// Configuração lida do ambiente (.env em desenvolvimento)
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub frontend_url: String,
    pub app_env: String,
    pub database_max_connections: u32,
    pub bcrypt_cost: u32,
    /// Quando ligado, o PUT de manutenção respeita o grafo de status.
    pub enforce_status_transitions: bool,
}

fn required(key: &str) -> anyhow::Result<String> {
    env::var(key).with_context(|| format!("{key} deve ser definida"))
}

fn parsed_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} inválida: {raw:?}")),
        _ => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port: parsed_or("PORT", 8080)?,
            frontend_url: env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            database_max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bcrypt_cost: parsed_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            enforce_status_transitions: parsed_or("ENFORCE_STATUS_TRANSITIONS", false)?,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub company_service: CompanyService,
    pub category_service: CategoryService,
    pub work_center_service: WorkCenterService,
    pub equipment_service: EquipmentService,
    pub team_service: TeamService,
    pub maintenance_service: MaintenanceService,
    pub dashboard_service: DashboardService,
    pub resource_service: ResourceService,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool) -> Self {
        Self::from_repositories(config, Repositories::postgres(pool))
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_repositories(config: Config, repos: Repositories) -> Self {
        let config = Arc::new(config);

        let auth_service = AuthService::new(
            repos.users.clone(),
            config.jwt_secret.clone(),
            config.bcrypt_cost,
        );
        let maintenance_service = MaintenanceService::new(
            repos.maintenance.clone(),
            repos.equipment.clone(),
            repos.work_centers.clone(),
            config.enforce_status_transitions,
        );
        let resource_service = ResourceService::new(
            repos.categories.clone(),
            repos.companies.clone(),
            repos.teams.clone(),
            repos.users.clone(),
            repos.work_centers.clone(),
        );

        Self {
            auth_service,
            company_service: CompanyService::new(repos.companies.clone()),
            category_service: CategoryService::new(repos.categories.clone()),
            work_center_service: WorkCenterService::new(repos.work_centers.clone()),
            equipment_service: EquipmentService::new(repos.equipment.clone()),
            team_service: TeamService::new(repos.teams.clone()),
            maintenance_service,
            dashboard_service: DashboardService::new(repos.dashboard.clone(), repos.maintenance.clone()),
            resource_service,
            config,
        }
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/gearguard_test".into(),
            jwt_secret: "test-secret".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            app_env: "test".into(),
            database_max_connections: 1,
            bcrypt_cost: 4,
            enforce_status_transitions: false,
        }
    }
}
