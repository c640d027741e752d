pub mod db_utils;
pub mod error;
pub mod json;
pub mod response;
pub mod serde_helpers;
pub mod validation;
