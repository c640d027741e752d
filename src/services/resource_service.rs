// src/services/resource_service.rs

use std::sync::Arc;

use crate::{
    common::error::AppError,
    db::{CategoryRepository, CompanyRepository, TeamRepository, UserRepository, WorkCenterRepository},
    models::{
        auth::UserSummary, category::EquipmentCategory, company::Company, scope::CompanyScope,
        team::MaintenanceTeam, work_center::WorkCenter,
    },
};

// Listas simples para popular os selects do frontend
#[derive(Clone)]
pub struct ResourceService {
    category_repo: Arc<dyn CategoryRepository>,
    company_repo: Arc<dyn CompanyRepository>,
    team_repo: Arc<dyn TeamRepository>,
    user_repo: Arc<dyn UserRepository>,
    work_center_repo: Arc<dyn WorkCenterRepository>,
}

impl ResourceService {
    pub fn new(
        category_repo: Arc<dyn CategoryRepository>,
        company_repo: Arc<dyn CompanyRepository>,
        team_repo: Arc<dyn TeamRepository>,
        user_repo: Arc<dyn UserRepository>,
        work_center_repo: Arc<dyn WorkCenterRepository>,
    ) -> Self {
        Self { category_repo, company_repo, team_repo, user_repo, work_center_repo }
    }

    pub async fn categories(&self, scope: CompanyScope) -> Result<Vec<EquipmentCategory>, AppError> {
        self.category_repo.list_plain(scope).await
    }

    pub async fn companies(&self) -> Result<Vec<Company>, AppError> {
        self.company_repo.list_plain().await
    }

    pub async fn teams(&self, scope: CompanyScope) -> Result<Vec<MaintenanceTeam>, AppError> {
        self.team_repo.list_plain(scope).await
    }

    pub async fn users(&self) -> Result<Vec<UserSummary>, AppError> {
        self.user_repo.list_summaries().await
    }

    pub async fn work_centers(&self, scope: CompanyScope) -> Result<Vec<WorkCenter>, AppError> {
        self.work_center_repo.list_plain(scope).await
    }
}
