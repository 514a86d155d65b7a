use serde::Serialize;
use utoipa::ToSchema;

pub mod auth;
pub mod bus_routes;
pub mod schedules;
pub mod tickets;
pub mod users;

#[derive(Debug, Serialize, ToSchema)]
pub struct CountData {
    pub count: i64,
}
