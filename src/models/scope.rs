// src/models/scope.rs

use uuid::Uuid;

// Contexto de empresa que atravessa todas as listagens e contagens.
// `All` reproduz o comportamento de "sem filtro".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompanyScope {
    #[default]
    All,
    Company(Uuid),
}

impl CompanyScope {
    pub fn company_id(&self) -> Option<Uuid> {
        match self {
            CompanyScope::All => None,
            CompanyScope::Company(id) => Some(*id),
        }
    }

    /// `true` quando a linha (com `company_id` opcional) está dentro do escopo.
    #[cfg(test)]
    pub fn includes(&self, company_id: Option<Uuid>) -> bool {
        match self {
            CompanyScope::All => true,
            CompanyScope::Company(id) => company_id == Some(*id),
        }
    }
}

impl From<Option<Uuid>> for CompanyScope {
    fn from(value: Option<Uuid>) -> Self {
        value.map(CompanyScope::Company).unwrap_or_default()
    }
}
