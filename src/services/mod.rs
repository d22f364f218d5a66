pub mod closure_service;
pub mod export_service;
pub mod interview_service;
pub mod interview_store;
pub mod position_service;
pub mod view_service;
