// src/handlers/auth.rs

use axum::extract::State;
use validator::Validate;

use crate::{
    common::{error::AppError, json::AppJson, response::ApiResponse},
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginUserPayload, RegisterUserPayload, UserProfile},
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Usuário criado, token emitido", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<RegisterUserPayload>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let auth = app_state.auth_service.register(payload).await?;
    Ok(ApiResponse::created(auth).with_message("User registered successfully"))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    AppJson(payload): AppJson<LoginUserPayload>,
) -> Result<ApiResponse<AuthResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let auth = app_state.auth_service.login(payload).await?;
    Ok(ApiResponse::ok(auth).with_message("Login successful"))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Perfil do usuário com suas empresas", body = UserProfile),
        (status = 401, description = "Não autorizado"),
        (status = 404, description = "Usuário removido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<ApiResponse<UserProfile>, AppError> {
    let profile = app_state.auth_service.profile(user.id).await?;
    Ok(ApiResponse::ok(profile))
}

// Tokens são stateless: o logout só confirma (o cliente descarta o token)
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Logout confirmado")),
    security(("api_jwt" = []))
)]
pub async fn logout(user: AuthenticatedUser) -> ApiResponse<()> {
    tracing::info!(user_id = %user.id, "Logout");
    ApiResponse::message("Logged out successfully")
}
