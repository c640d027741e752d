// src/services/company_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CompanyRepository,
    models::{
        company::{Company, CompanyDetail, CompanyOverview, CreateCompanyPayload, UpdateCompanyPayload},
        scope::CompanyScope,
    },
};

#[derive(Clone)]
pub struct CompanyService {
    company_repo: Arc<dyn CompanyRepository>,
}

impl CompanyService {
    pub fn new(company_repo: Arc<dyn CompanyRepository>) -> Self {
        Self { company_repo }
    }

    pub async fn get_all(&self, scope: CompanyScope) -> Result<Vec<CompanyOverview>, AppError> {
        self.company_repo.list(scope).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CompanyDetail, AppError> {
        self.company_repo.find(id).await?.ok_or(AppError::NotFound("Company"))
    }

    /// Cria a empresa e torna o usuário autenticado seu "owner".
    pub async fn create(&self, payload: CreateCompanyPayload, owner_id: Uuid) -> Result<Company, AppError> {
        let company = self.company_repo.create_with_owner(payload, owner_id).await?;
        tracing::info!(company_id = %company.id, owner_id = %owner_id, "Empresa criada");
        Ok(company)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCompanyPayload) -> Result<Company, AppError> {
        let company = self
            .company_repo
            .update(id, payload)
            .await?
            .ok_or(AppError::NotFound("Company"))?;
        tracing::info!(company_id = %id, "Empresa atualizada");
        Ok(company)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.company_repo.delete(id).await? {
            return Err(AppError::NotFound("Company"));
        }
        tracing::info!(company_id = %id, "Empresa removida");
        Ok(())
    }
}
