pub mod auth;
pub mod category;
pub mod company;
pub mod dashboard;
pub mod equipment;
pub mod maintenance;
pub mod resource;
pub mod team;
pub mod work_center;
