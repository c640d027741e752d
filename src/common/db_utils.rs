// src/common/db_utils.rs

use crate::common::error::AppError;

// Constraint UNIQUE criada pelo Postgres para users.email
const USERS_EMAIL_KEY: &str = "users_email_key";

/// Traduz erros de escrita do Postgres para variantes de domínio.
/// - UNIQUE em users.email -> `EmailAlreadyExists`
/// - FOREIGN KEY -> `InvalidReference` (id de empresa/usuário/equipe inexistente)
pub fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() && db_err.constraint() == Some(USERS_EMAIL_KEY) {
            return AppError::EmailAlreadyExists;
        }
        if db_err.is_foreign_key_violation() {
            tracing::warn!(constraint = ?db_err.constraint(), "Referência inválida na escrita");
            return AppError::InvalidReference;
        }
    }
    err.into()
}
