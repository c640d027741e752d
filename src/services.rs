pub mod auth;
pub mod category_service;
pub mod company_service;
pub mod dashboard_service;
pub mod equipment_service;
pub mod maintenance_service;
pub mod resource_service;
pub mod team_service;
pub mod work_center_service;
