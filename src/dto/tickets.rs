use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Ticket, TicketStatusChange};

/// Booking payload. A client-supplied status is ignored; new tickets start as PENDING.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookTicketRequest {
    pub passenger_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub route_name: Option<String>,
    /// `YYYY-MM-DDTHH:MM[:SS]`, local time of departure.
    pub travel_date_time: Option<String>,
    pub seat_number: Option<i32>,
    pub price: Option<f64>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusUpdateRequest {
    pub status: Option<String>,
    pub reason: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkStatusUpdateRequest {
    #[serde(default)]
    pub ticket_ids: Vec<i64>,
    pub status: Option<String>,
    pub reason: Option<String>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TicketList {
    #[schema(value_type = Vec<Ticket>)]
    pub items: Vec<Ticket>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct TicketHistory {
    #[schema(value_type = Vec<TicketStatusChange>)]
    pub items: Vec<TicketStatusChange>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TicketStatistics {
    pub total: i64,
    pub pending: i64,
    pub confirmed: i64,
    pub canceled: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailableSeats {
    pub route_name: String,
    pub travel_date_time: NaiveDateTime,
    pub seats: Vec<i32>,
}
