pub mod auth;
pub mod category;
pub mod company;
pub mod dashboard;
pub mod equipment;
pub mod maintenance;
pub mod scope;
pub mod team;
pub mod work_center;
