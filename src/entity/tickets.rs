use std::{fmt, str::FromStr};

use sea_orm::entity::prelude::*;
use sea_orm::{QueryOrder, QuerySelect};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "CANCELED")]
    Canceled,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "PENDING",
            TicketStatus::Confirmed => "CONFIRMED",
            TicketStatus::Canceled => "CANCELED",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(TicketStatus::Pending),
            "CONFIRMED" => Ok(TicketStatus::Confirmed),
            // both spellings show up in clients
            "CANCELED" | "CANCELLED" => Ok(TicketStatus::Canceled),
            other => Err(format!(
                "Invalid ticket status '{other}', expected one of PENDING, CONFIRMED, CANCELED"
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub passenger_name: String,
    pub email: String,
    pub phone_number: String,
    pub route_name: String,
    pub travel_date_time: DateTime,
    pub seat_number: i32,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub status: TicketStatus,
    pub user_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ticket_status_history::Entity")]
    StatusHistory,
}

impl Related<super::ticket_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Entity {
    pub fn find_ordered() -> Select<Entity> {
        Self::find().order_by_asc(Column::Id)
    }

    pub fn find_by_route_and_travel(route_name: &str, travel_date_time: DateTime) -> Select<Entity> {
        Self::find()
            .filter(Column::RouteName.eq(route_name))
            .filter(Column::TravelDateTime.eq(travel_date_time))
            .order_by_asc(Column::SeatNumber)
    }

    pub fn find_by_user_newest_first(user_id: i64) -> Select<Entity> {
        Self::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
    }

    pub fn find_by_status(status: TicketStatus) -> Select<Entity> {
        Self::find().filter(Column::Status.eq(status))
    }

    pub fn find_by_status_in(statuses: Vec<TicketStatus>) -> Select<Entity> {
        Self::find().filter(Column::Status.is_in(statuses))
    }

    /// Seat numbers held by non-canceled tickets on one route departure.
    pub async fn find_booked_seats<C>(
        db: &C,
        route_name: &str,
        travel_date_time: DateTime,
    ) -> Result<Vec<i32>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::find()
            .select_only()
            .column(Column::SeatNumber)
            .filter(Column::RouteName.eq(route_name))
            .filter(Column::TravelDateTime.eq(travel_date_time))
            .filter(Column::Status.ne(TicketStatus::Canceled))
            .into_tuple::<i32>()
            .all(db)
            .await
    }
}
