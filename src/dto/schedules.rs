use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Schedule;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub route_id: Option<i64>,
    pub route_name: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub frequency: Option<String>,
    pub available_seats: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ScheduleList {
    #[schema(value_type = Vec<Schedule>)]
    pub items: Vec<Schedule>,
}
