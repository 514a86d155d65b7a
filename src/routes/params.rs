use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

/// Ticket listing filters. Route and departure only apply when both are given.
#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct TicketQuery {
    pub route_name: Option<String>,
    /// `YYYY-MM-DDTHH:MM[:SS]`
    pub travel_date_time: Option<String>,
    /// Comma separated statuses, e.g. `PENDING,CONFIRMED`.
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SeatQuery {
    pub route_name: Option<String>,
    pub travel_date_time: Option<String>,
}
