// src/middleware/tenancy.rs

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, models::scope::CompanyScope};

// O nome do nosso cabeçalho HTTP customizado
pub const COMPANY_ID_HEADER: &str = "x-company-id";

#[derive(Debug, Default, Deserialize)]
struct ScopeQuery {
    #[serde(rename = "companyId")]
    company_id: Option<String>,
}

fn parse_company_id(raw: &str, source: &str) -> Result<CompanyScope, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(CompanyScope::All);
    }
    Uuid::parse_str(raw)
        .map(CompanyScope::Company)
        .map_err(|_| AppError::BadRequest(format!("{source} must be a valid UUID")))
}

// Escopo de empresa: `?companyId=` tem prioridade sobre o cabeçalho X-Company-Id.
// Sem nenhum dos dois, todas as empresas.
impl<S> FromRequestParts<S> for CompanyScope
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<ScopeQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();

        if let Some(raw) = query.company_id.as_deref() {
            return parse_company_id(raw, "companyId");
        }

        match parts.headers.get(COMPANY_ID_HEADER) {
            Some(value) => {
                let value_str = value
                    .to_str()
                    .map_err(|_| AppError::BadRequest("X-Company-Id contains invalid characters".into()))?;
                parse_company_id(value_str, "X-Company-Id")
            }
            None => Ok(CompanyScope::All),
        }
    }
}
