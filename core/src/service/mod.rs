pub mod auth_service;
pub mod export_service;
pub mod state;
