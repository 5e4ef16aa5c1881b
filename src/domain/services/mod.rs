pub mod activity_service;
pub mod binding_service;
pub mod plan_service;
pub mod registry_service;
