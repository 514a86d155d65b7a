pub mod auth_service;
pub mod route_service;
pub mod schedule_service;
pub mod ticket_service;
pub mod user_service;
