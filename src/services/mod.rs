pub mod auth;
pub mod crm_service;
pub mod estimate;
pub mod lifecycle;
pub mod project_service;
