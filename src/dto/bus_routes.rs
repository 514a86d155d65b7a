use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Route;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    pub intermediate_stops: Option<String>,
    pub distance: Option<f64>,
    pub estimated_travel_time: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RouteList {
    #[schema(value_type = Vec<Route>)]
    pub items: Vec<Route>,
}
