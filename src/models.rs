use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    bus_routes, schedules, ticket_status_history,
    tickets::{self, TicketStatus},
    users::{self, UserRole},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: i64,
    pub start_point: String,
    pub end_point: String,
    pub intermediate_stops: Option<String>,
    pub distance: f64,
    pub estimated_travel_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: i64,
    pub route_id: Option<i64>,
    pub route_name: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub frequency: String,
    pub available_seats: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    pub passenger_name: String,
    pub email: String,
    pub phone_number: String,
    pub route_name: String,
    pub travel_date_time: NaiveDateTime,
    pub seat_number: i32,
    pub price: f64,
    pub status: TicketStatus,
    pub user_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketStatusChange {
    pub id: i64,
    pub ticket_id: i64,
    pub old_status: Option<TicketStatus>,
    pub new_status: TicketStatus,
    pub changed_by_user_id: i64,
    pub changed_by_role: String,
    pub change_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user; the password hash never leaves the service layer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<bus_routes::Model> for Route {
    fn from(model: bus_routes::Model) -> Self {
        Self {
            id: model.id,
            start_point: model.start_point,
            end_point: model.end_point,
            intermediate_stops: model.intermediate_stops,
            distance: model.distance,
            estimated_travel_time: model.estimated_travel_time,
        }
    }
}

impl From<schedules::Model> for Schedule {
    fn from(model: schedules::Model) -> Self {
        Self {
            id: model.id,
            route_id: model.route_id,
            route_name: model.route_name,
            departure_time: model.departure_time,
            arrival_time: model.arrival_time,
            frequency: model.frequency,
            available_seats: model.available_seats,
        }
    }
}

impl From<tickets::Model> for Ticket {
    fn from(model: tickets::Model) -> Self {
        Self {
            id: model.id,
            passenger_name: model.passenger_name,
            email: model.email,
            phone_number: model.phone_number,
            route_name: model.route_name,
            travel_date_time: model.travel_date_time,
            seat_number: model.seat_number,
            price: model.price,
            status: model.status,
            user_id: model.user_id,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            updated_by: model.updated_by,
        }
    }
}

impl From<ticket_status_history::Model> for TicketStatusChange {
    fn from(model: ticket_status_history::Model) -> Self {
        Self {
            id: model.id,
            ticket_id: model.ticket_id,
            old_status: model.old_status,
            new_status: model.new_status,
            changed_by_user_id: model.changed_by_user_id,
            changed_by_role: model.changed_by_role,
            change_reason: model.change_reason,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            phone_number: model.phone_number,
            role: model.role,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}
