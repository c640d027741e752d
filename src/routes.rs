// src/routes.rs

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use serde_json::{Value, json};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers,
    middleware::{auth::auth_guard, tenancy::COMPANY_ID_HEADER},
};

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

// Índice da API (público)
async fn api_index(State(app_state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": "GearGuard API",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": app_state.config.app_env,
        "docs": "/swagger-ui",
    }))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::HeaderName::from_static(COMPANY_ID_HEADER),
        ]);

    match config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url = %config.frontend_url, "FRONTEND_URL inválida, CORS sem origem liberada");
            layer
        }
    }
}

/// Router completo: rotas públicas, rotas protegidas por JWT e a documentação.
pub fn build_router(app_state: AppState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api", get(api_index))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login));

    let protected = Router::new()
        // --- Auth ---
        .route("/api/auth/me", get(handlers::auth::get_me))
        .route("/api/auth/logout", post(handlers::auth::logout))
        // --- Companies ---
        .route(
            "/api/companies",
            get(handlers::company::list_companies).post(handlers::company::create_company),
        )
        .route(
            "/api/companies/{id}",
            get(handlers::company::get_company)
                .put(handlers::company::update_company)
                .delete(handlers::company::delete_company),
        )
        // --- Categories ---
        .route(
            "/api/categories",
            get(handlers::category::list_categories).post(handlers::category::create_category),
        )
        .route(
            "/api/categories/{id}",
            get(handlers::category::get_category)
                .put(handlers::category::update_category)
                .delete(handlers::category::delete_category),
        )
        // --- Work centers ---
        .route(
            "/api/work-centers",
            get(handlers::work_center::list_work_centers).post(handlers::work_center::create_work_center),
        )
        .route(
            "/api/work-centers/{id}",
            get(handlers::work_center::get_work_center)
                .put(handlers::work_center::update_work_center)
                .delete(handlers::work_center::delete_work_center),
        )
        // --- Equipment ---
        .route(
            "/api/equipment",
            get(handlers::equipment::list_equipment).post(handlers::equipment::create_equipment),
        )
        .route(
            "/api/equipment/{id}",
            get(handlers::equipment::get_equipment)
                .put(handlers::equipment::update_equipment)
                .delete(handlers::equipment::delete_equipment),
        )
        // --- Teams ---
        .route(
            "/api/teams",
            get(handlers::team::list_teams).post(handlers::team::create_team),
        )
        .route(
            "/api/teams/{id}",
            get(handlers::team::get_team)
                .put(handlers::team::update_team)
                .delete(handlers::team::delete_team),
        )
        .route("/api/teams/{id}/members", post(handlers::team::add_team_member))
        .route(
            "/api/teams/{id}/members/{member_id}",
            delete(handlers::team::remove_team_member),
        )
        // --- Maintenance ---
        .route("/api/maintenance/stages", get(handlers::maintenance::list_stages))
        .route(
            "/api/maintenance",
            get(handlers::maintenance::list_requests).post(handlers::maintenance::create_request),
        )
        .route(
            "/api/maintenance/{id}",
            get(handlers::maintenance::get_request)
                .put(handlers::maintenance::update_request)
                .delete(handlers::maintenance::delete_request),
        )
        // --- Dashboard ---
        .route("/api/dashboard/stats", get(handlers::dashboard::get_stats))
        .route("/api/dashboard/recent-requests", get(handlers::dashboard::get_recent_requests))
        // --- Resources ---
        .route("/api/resources/categories", get(handlers::resource::categories))
        .route("/api/resources/companies", get(handlers::resource::companies))
        .route("/api/resources/teams", get(handlers::resource::teams))
        .route("/api/resources/users", get(handlers::resource::users))
        .route("/api/resources/work-centers", get(handlers::resource::work_centers))
        .route_layer(axum_middleware::from_fn_with_state(app_state.clone(), auth_guard));

    let cors = cors_layer(&app_state.config);

    public
        .merge(protected)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
