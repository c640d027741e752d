// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::common;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(title = "GearGuard API", description = "Gestão de manutenção: equipamentos, equipes e requisições"),
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::logout,

        // --- Companies ---
        handlers::company::list_companies,
        handlers::company::get_company,
        handlers::company::create_company,
        handlers::company::update_company,
        handlers::company::delete_company,

        // --- Categories ---
        handlers::category::list_categories,
        handlers::category::get_category,
        handlers::category::create_category,
        handlers::category::update_category,
        handlers::category::delete_category,

        // --- Work Centers ---
        handlers::work_center::list_work_centers,
        handlers::work_center::get_work_center,
        handlers::work_center::create_work_center,
        handlers::work_center::update_work_center,
        handlers::work_center::delete_work_center,

        // --- Equipment ---
        handlers::equipment::list_equipment,
        handlers::equipment::get_equipment,
        handlers::equipment::create_equipment,
        handlers::equipment::update_equipment,
        handlers::equipment::delete_equipment,

        // --- Teams ---
        handlers::team::list_teams,
        handlers::team::get_team,
        handlers::team::create_team,
        handlers::team::update_team,
        handlers::team::delete_team,
        handlers::team::add_team_member,
        handlers::team::remove_team_member,

        // --- Maintenance ---
        handlers::maintenance::list_requests,
        handlers::maintenance::get_request,
        handlers::maintenance::create_request,
        handlers::maintenance::update_request,
        handlers::maintenance::delete_request,
        handlers::maintenance::list_stages,

        // --- Dashboard ---
        handlers::dashboard::get_stats,
        handlers::dashboard::get_recent_requests,

        // --- Resources ---
        handlers::resource::categories,
        handlers::resource::companies,
        handlers::resource::teams,
        handlers::resource::users,
        handlers::resource::work_centers,
    ),
    components(
        schemas(
            common::response::FieldError,

            // --- Auth ---
            models::auth::User,
            models::auth::UserSummary,
            models::auth::CompanyMembership,
            models::auth::UserProfile,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Companies ---
            models::company::Company,
            models::company::CompanyOverview,
            models::company::CompanyMember,
            models::company::CompanyDetail,
            models::company::CreateCompanyPayload,
            models::company::UpdateCompanyPayload,

            // --- Categories ---
            models::category::EquipmentCategory,
            models::category::CategoryDetail,
            models::category::CreateCategoryPayload,
            models::category::UpdateCategoryPayload,

            // --- Work Centers ---
            models::work_center::WorkCenter,
            models::work_center::WorkCenterDetail,
            models::work_center::CreateWorkCenterPayload,
            models::work_center::UpdateWorkCenterPayload,

            // --- Equipment ---
            models::equipment::EquipmentStatus,
            models::equipment::Equipment,
            models::equipment::EquipmentDetail,
            models::equipment::CreateEquipmentPayload,
            models::equipment::UpdateEquipmentPayload,

            // --- Teams ---
            models::team::MaintenanceTeam,
            models::team::TeamMember,
            models::team::TeamMemberDetail,
            models::team::TeamDetail,
            models::team::CreateTeamPayload,
            models::team::UpdateTeamPayload,
            models::team::AddMemberPayload,

            // --- Maintenance ---
            models::maintenance::RequestPriority,
            models::maintenance::RequestStatus,
            models::maintenance::RequestType,
            models::maintenance::MaintenanceStage,
            models::maintenance::StageInfo,
            models::maintenance::MaintenanceRequest,
            models::maintenance::MaintenanceRequestDetail,
            models::maintenance::CreateMaintenancePayload,
            models::maintenance::UpdateMaintenancePayload,

            // --- Dashboard ---
            models::dashboard::DashboardStats,
            models::dashboard::MonthCount,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Perfil"),
        (name = "Companies", description = "Empresas e seus membros"),
        (name = "Categories", description = "Categorias de Equipamento"),
        (name = "Work Centers", description = "Centros de Trabalho"),
        (name = "Equipment", description = "Cadastro de Equipamentos"),
        (name = "Teams", description = "Equipes de Manutenção"),
        (name = "Maintenance", description = "Requisições de Manutenção (kanban)"),
        (name = "Dashboard", description = "Indicadores Gerenciais"),
        (name = "Resources", description = "Listas simples para formulários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
