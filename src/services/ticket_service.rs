use chrono::{NaiveDateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QuerySelect, Set,
    TransactionTrait,
};

use crate::{
    dto::{
        CountData,
        tickets::{
            AvailableSeats, BookTicketRequest, BulkStatusUpdateRequest, TicketHistory, TicketList,
            TicketStatistics, TicketStatusUpdateRequest,
        },
    },
    entity::{
        ticket_status_history::{ActiveModel as HistoryActive, Entity as TicketStatusHistory},
        tickets::{ActiveModel as TicketActive, Entity as Tickets, Model as TicketModel, TicketStatus},
    },
    error::{AppError, AppResult},
    models::{Ticket, TicketStatusChange},
    response::{ApiResponse, Meta},
    routes::params::{SeatQuery, TicketQuery},
    state::AppState,
    validation::{
        available_seats, optional_text, parse_travel_date_time, require_text, validate_seat_number,
    },
};

pub const USER_ROLE: &str = "USER";
pub const ADMIN_ROLE: &str = "ADMIN";
/// Ledger actor id for cancellations made by the ticket holder.
pub const USER_ACTOR_ID: i64 = 0;
pub const USER_CANCEL_REASON: &str = "Ticket canceled by user";

/// Who made a status change and why, as written to the ledger.
struct StatusChange<'a> {
    new_status: TicketStatus,
    updated_by: Option<String>,
    actor_id: i64,
    actor_role: &'a str,
    reason: Option<String>,
}

fn ticket_list(models: Vec<TicketModel>) -> (TicketList, Meta) {
    let items: Vec<Ticket> = models.into_iter().map(Ticket::from).collect();
    let meta = Meta::unpaged(items.len());
    (TicketList { items }, meta)
}

fn parse_status(value: &str) -> AppResult<TicketStatus> {
    value.parse::<TicketStatus>().map_err(AppError::BadRequest)
}

fn required_status(value: Option<&str>) -> AppResult<TicketStatus> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_status(v),
        None => Err(AppError::BadRequest("Status is required".into())),
    }
}

/// Comma separated statuses, e.g. `PENDING,CONFIRMED`.
fn parse_status_filter(value: &str) -> AppResult<Vec<TicketStatus>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_status)
        .collect()
}

/// Writes the new status and appends one ledger row. Must run inside `txn`.
async fn apply_status_change(
    txn: &DatabaseTransaction,
    ticket: TicketModel,
    change: &StatusChange<'_>,
) -> AppResult<TicketModel> {
    let old_status = ticket.status;
    let ticket_id = ticket.id;

    let mut active: TicketActive = ticket.into();
    active.status = Set(change.new_status);
    active.updated_by = Set(change.updated_by.clone());
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(txn).await?;

    HistoryActive {
        id: NotSet,
        ticket_id: Set(ticket_id),
        old_status: Set(Some(old_status)),
        new_status: Set(change.new_status),
        changed_by_user_id: Set(change.actor_id),
        changed_by_role: Set(change.actor_role.to_string()),
        change_reason: Set(change.reason.clone()),
        created_at: NotSet,
    }
    .insert(txn)
    .await?;

    tracing::info!(
        ticket_id,
        old_status = %old_status,
        new_status = %change.new_status,
        actor_id = change.actor_id,
        role = change.actor_role,
        "ticket status changed"
    );

    Ok(updated)
}

pub async fn book_ticket(
    state: &AppState,
    payload: BookTicketRequest,
) -> AppResult<ApiResponse<Ticket>> {
    let passenger_name =
        require_text(payload.passenger_name.as_deref(), "Passenger name is required")?;
    let email = require_text(payload.email.as_deref(), "Email is required")?;
    let phone_number = require_text(payload.phone_number.as_deref(), "Phone number is required")?;
    let route_name = require_text(payload.route_name.as_deref(), "Route name is required")?;
    let travel_date_time = match payload.travel_date_time.as_deref() {
        Some(v) if !v.trim().is_empty() => parse_travel_date_time(v)?,
        _ => return Err(AppError::BadRequest("Travel date time is required".into())),
    };
    let seat_number = payload
        .seat_number
        .ok_or_else(|| AppError::BadRequest("Seat number is required".into()))?;
    validate_seat_number(seat_number)?;
    let price = match payload.price {
        Some(p) if p.is_finite() && p >= 0.0 => p,
        Some(_) => return Err(AppError::BadRequest("Price must not be negative".into())),
        None => return Err(AppError::BadRequest("Price is required".into())),
    };

    // not atomic with the insert; two concurrent bookings can still take the same seat
    let booked = Tickets::find_booked_seats(&state.orm, &route_name, travel_date_time).await?;
    if booked.contains(&seat_number) {
        return Err(AppError::BadRequest(format!(
            "Seat {seat_number} is already booked"
        )));
    }

    let ticket = TicketActive {
        id: NotSet,
        passenger_name: Set(passenger_name),
        email: Set(email),
        phone_number: Set(phone_number),
        route_name: Set(route_name),
        travel_date_time: Set(travel_date_time),
        seat_number: Set(seat_number),
        price: Set(price),
        status: Set(TicketStatus::Pending),
        user_id: Set(payload.user_id),
        created_at: NotSet,
        updated_at: NotSet,
        updated_by: Set(None),
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(
        ticket_id = ticket.id,
        route = %ticket.route_name,
        seat = ticket.seat_number,
        "ticket booked"
    );

    Ok(ApiResponse::success(
        "Ticket booked",
        Ticket::from(ticket),
        Some(Meta::empty()),
    ))
}

pub async fn list_tickets(
    state: &AppState,
    query: TicketQuery,
) -> AppResult<ApiResponse<TicketList>> {
    let route_name = query
        .route_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let travel = query
        .travel_date_time
        .as_deref()
        .filter(|s| !s.trim().is_empty());
    let statuses = match query.status.as_deref() {
        Some(v) => parse_status_filter(v)?,
        None => Vec::new(),
    };

    let models = match (route_name, travel) {
        (Some(route_name), Some(travel)) => {
            let travel = parse_travel_date_time(travel)?;
            let mut tickets = Tickets::find_by_route_and_travel(route_name, travel)
                .all(&state.orm)
                .await?;
            if !statuses.is_empty() {
                tickets.retain(|t| statuses.contains(&t.status));
            }
            tickets
        }
        _ if !statuses.is_empty() => {
            Tickets::find_by_status_in(statuses)
                .all(&state.orm)
                .await?
        }
        _ => Tickets::find_ordered().all(&state.orm).await?,
    };

    let (list, meta) = ticket_list(models);
    Ok(ApiResponse::success("Tickets", list, Some(meta)))
}

pub async fn list_user_tickets(
    state: &AppState,
    user_id: i64,
) -> AppResult<ApiResponse<TicketList>> {
    let models = Tickets::find_by_user_newest_first(user_id)
        .all(&state.orm)
        .await?;
    let (list, meta) = ticket_list(models);
    Ok(ApiResponse::success("Tickets", list, Some(meta)))
}

pub async fn get_ticket(state: &AppState, id: i64) -> AppResult<ApiResponse<Ticket>> {
    let ticket = Tickets::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Ticket::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Ticket", ticket, None))
}

/// Cancellation by the ticket holder.
pub async fn cancel_ticket(state: &AppState, id: i64) -> AppResult<()> {
    let txn = state.orm.begin().await?;

    let ticket = Tickets::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;

    if ticket.status == TicketStatus::Canceled {
        return Err(AppError::BadRequest("Ticket is already canceled".into()));
    }

    let change = StatusChange {
        new_status: TicketStatus::Canceled,
        updated_by: Some(USER_ROLE.to_string()),
        actor_id: USER_ACTOR_ID,
        actor_role: USER_ROLE,
        reason: Some(USER_CANCEL_REASON.to_string()),
    };
    apply_status_change(&txn, ticket, &change).await?;

    txn.commit().await?;
    Ok(())
}

pub async fn update_ticket_status(
    state: &AppState,
    id: i64,
    actor_id: i64,
    payload: TicketStatusUpdateRequest,
) -> AppResult<ApiResponse<Ticket>> {
    let change = StatusChange {
        new_status: required_status(payload.status.as_deref())?,
        updated_by: optional_text(payload.updated_by),
        actor_id,
        actor_role: ADMIN_ROLE,
        reason: optional_text(payload.reason),
    };

    let txn = state.orm.begin().await?;
    let ticket = Tickets::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let updated = apply_status_change(&txn, ticket, &change).await?;
    txn.commit().await?;

    Ok(ApiResponse::success(
        "Ticket status updated",
        Ticket::from(updated),
        Some(Meta::empty()),
    ))
}

/// Ids without a ticket are skipped; the response holds only the tickets that changed.
pub async fn bulk_update_ticket_status(
    state: &AppState,
    actor_id: i64,
    payload: BulkStatusUpdateRequest,
) -> AppResult<ApiResponse<TicketList>> {
    if payload.ticket_ids.is_empty() {
        return Err(AppError::BadRequest("Ticket ids are required".into()));
    }
    let change = StatusChange {
        new_status: required_status(payload.status.as_deref())?,
        updated_by: optional_text(payload.updated_by),
        actor_id,
        actor_role: ADMIN_ROLE,
        reason: optional_text(payload.reason),
    };

    let mut ids = payload.ticket_ids;
    ids.sort_unstable();
    ids.dedup();

    let txn = state.orm.begin().await?;
    let mut updated = Vec::with_capacity(ids.len());
    for id in ids {
        let Some(ticket) = Tickets::find_by_id(id)
            .lock(LockType::Update)
            .one(&txn)
            .await?
        else {
            tracing::warn!(ticket_id = id, "bulk status update skipped missing ticket");
            continue;
        };
        updated.push(apply_status_change(&txn, ticket, &change).await?);
    }
    txn.commit().await?;

    let (list, meta) = ticket_list(updated);
    Ok(ApiResponse::success("Ticket statuses updated", list, Some(meta)))
}

pub async fn ticket_statistics(state: &AppState) -> AppResult<ApiResponse<TicketStatistics>> {
    let total = Tickets::find().count(&state.orm).await? as i64;
    let pending = Tickets::find_by_status(TicketStatus::Pending)
        .count(&state.orm)
        .await? as i64;
    let confirmed = Tickets::find_by_status(TicketStatus::Confirmed)
        .count(&state.orm)
        .await? as i64;
    let canceled = Tickets::find_by_status(TicketStatus::Canceled)
        .count(&state.orm)
        .await? as i64;

    Ok(ApiResponse::success(
        "Ticket statistics",
        TicketStatistics {
            total,
            pending,
            confirmed,
            canceled,
        },
        None,
    ))
}

pub async fn count_tickets(state: &AppState) -> AppResult<ApiResponse<CountData>> {
    let count = Tickets::find().count(&state.orm).await? as i64;
    Ok(ApiResponse::success("Ticket count", CountData { count }, None))
}

/// Ledger rows outlive the ticket, so a deleted ticket still reports its history.
pub async fn ticket_history(
    state: &AppState,
    ticket_id: i64,
) -> AppResult<ApiResponse<TicketHistory>> {
    let items: Vec<TicketStatusChange> = TicketStatusHistory::find_by_ticket_newest_first(ticket_id)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(TicketStatusChange::from)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success(
        "Ticket status history",
        TicketHistory { items },
        Some(meta),
    ))
}

pub async fn available_seats_for(
    state: &AppState,
    query: SeatQuery,
) -> AppResult<ApiResponse<AvailableSeats>> {
    let route_name = require_text(query.route_name.as_deref(), "routeName is required")?;
    let travel_date_time: NaiveDateTime = match query.travel_date_time.as_deref() {
        Some(v) if !v.trim().is_empty() => parse_travel_date_time(v)?,
        _ => return Err(AppError::BadRequest("travelDateTime is required".into())),
    };

    let booked = Tickets::find_booked_seats(&state.orm, &route_name, travel_date_time).await?;
    let seats = available_seats(&booked);

    Ok(ApiResponse::success(
        "Available seats",
        AvailableSeats {
            route_name,
            travel_date_time,
            seats,
        },
        None,
    ))
}

pub async fn delete_ticket(state: &AppState, id: i64) -> AppResult<()> {
    let result = Tickets::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(ticket_id = id, "ticket deleted");
    Ok(())
}
