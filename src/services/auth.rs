// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{AuthResponse, Claims, LoginUserPayload, NewUser, RegisterUserPayload, User, UserProfile},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    user_repo: Arc<dyn UserRepository>,
    jwt_secret: String,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt_secret: String, bcrypt_cost: u32) -> Self {
        Self { user_repo, jwt_secret, bcrypt_cost }
    }

    pub async fn register(&self, payload: RegisterUserPayload) -> Result<AuthResponse, AppError> {
        // Checagem antecipada: evita gastar um hash bcrypt à toa.
        // A constraint UNIQUE continua valendo para corridas.
        if self.user_repo.find_by_email(&payload.email).await?.is_some() {
            return Err(AppError::EmailAlreadyExists);
        }

        // Hashing em thread separada (bcrypt é CPU-bound)
        let password = payload.password;
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || hash(password, cost))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let user = self
            .user_repo
            .create(NewUser {
                email: payload.email,
                password_hash,
                full_name: payload.full_name,
            })
            .await?;

        tracing::info!(user_id = %user.id, "Usuário registrado");

        let token = self.create_token(&user)?;
        Ok(AuthResponse::new(user, token))
    }

    pub async fn login(&self, payload: LoginUserPayload) -> Result<AuthResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(&payload.email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password = payload.password;
        let password_hash = user.password_hash.clone();

        // Executa a verificação em um thread separado
        let is_password_valid = tokio::task::spawn_blocking(move || verify(password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;

        if !is_password_valid {
            tracing::warn!(user_id = %user.id, "Tentativa de login com senha incorreta");
            return Err(AppError::InvalidCredentials);
        }

        let token = self.create_token(&user)?;
        Ok(AuthResponse::new(user, token))
    }

    pub async fn profile(&self, user_id: uuid::Uuid) -> Result<UserProfile, AppError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::NotFound("User"))?;
        let companies = self.user_repo.memberships(user_id).await?;
        Ok(UserProfile { user, companies })
    }

    /// Valida assinatura e expiração; não consulta o banco.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;
        Ok(token_data.claims)
    }

    fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repositories;

    fn service() -> (AuthService, Arc<crate::db::memory::InMemoryStore>) {
        let (repos, store) = Repositories::in_memory();
        (AuthService::new(repos.users, "test-secret".into(), 4), store)
    }

    fn register_payload(email: &str) -> RegisterUserPayload {
        RegisterUserPayload {
            email: email.into(),
            password: "Str0ngPass".into(),
            full_name: Some("Ana Souza".into()),
        }
    }

    #[tokio::test]
    async fn register_returns_profile_and_valid_token() {
        let (auth, _) = service();
        let response = auth.register(register_payload("ana@plant.io")).await.unwrap();

        assert_eq!(response.email, "ana@plant.io");
        assert_eq!(response.role, "user");
        let claims = auth.verify_token(&response.token).unwrap();
        assert_eq!(claims.user_id, response.id);
        assert_eq!(claims.email, "ana@plant.io");
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_new_row() {
        let (auth, store) = service();
        auth.register(register_payload("dup@plant.io")).await.unwrap();

        let err = auth.register(register_payload("dup@plant.io")).await.unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyExists));
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let (auth, _) = service();
        auth.register(register_payload("bob@plant.io")).await.unwrap();

        let err = auth
            .login(LoginUserPayload { email: "bob@plant.io".into(), password: "Wr0ngPass".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));

        let unknown = auth
            .login(LoginUserPayload { email: "nobody@plant.io".into(), password: "Str0ngPass".into() })
            .await
            .unwrap_err();
        assert!(matches!(unknown, AppError::InvalidCredentials));

        let ok = auth
            .login(LoginUserPayload { email: "bob@plant.io".into(), password: "Str0ngPass".into() })
            .await
            .unwrap();
        assert!(!ok.token.is_empty());
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let (auth, _) = service();
        let response = auth.register(register_payload("eve@plant.io")).await.unwrap();

        let other = AuthService::new(Repositories::in_memory().0.users, "other-secret".into(), 4);
        assert!(matches!(other.verify_token(&response.token), Err(AppError::InvalidToken)));
        assert!(matches!(auth.verify_token("garbage"), Err(AppError::InvalidToken)));
    }

    #[tokio::test]
    async fn profile_of_missing_user_is_not_found() {
        let (auth, store) = service();
        let user = store.seed_user("carl@plant.io", Some("Carl"));

        let profile = auth.profile(user.id).await.unwrap();
        assert_eq!(profile.user.id, user.id);
        assert!(profile.companies.is_empty());

        let err = auth.profile(uuid::Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound("User")));
    }
}
