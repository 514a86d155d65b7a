use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    dto::{
        CountData,
        tickets::{
            AvailableSeats, BookTicketRequest, BulkStatusUpdateRequest, TicketHistory, TicketList,
            TicketStatistics, TicketStatusUpdateRequest,
        },
    },
    error::AppResult,
    middleware::auth::AdminActor,
    models::Ticket,
    response::ApiResponse,
    routes::params::{SeatQuery, TicketQuery},
    services::ticket_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_tickets))
        .route("/book", post(book_ticket))
        .route("/user/{user_id}", get(list_user_tickets))
        .route("/cancel/{id}", put(cancel_ticket))
        .route("/bulk-status", put(bulk_update_status))
        .route("/statistics", get(ticket_statistics))
        .route("/count", get(count_tickets))
        .route("/available-seats", get(available_seats))
        .route("/{id}", get(get_ticket).delete(delete_ticket))
        .route("/{id}/status", put(update_status))
        .route("/{id}/history", get(ticket_history))
}

#[utoipa::path(
    post,
    path = "/api/tickets/book",
    request_body = BookTicketRequest,
    responses(
        (status = 201, description = "Ticket booked as PENDING", body = ApiResponse<Ticket>),
        (status = 400, description = "Invalid booking or seat taken"),
    ),
    tag = "Tickets"
)]
pub async fn book_ticket(
    State(state): State<AppState>,
    Json(payload): Json<BookTicketRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Ticket>>)> {
    let resp = ticket_service::book_ticket(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/api/tickets",
    params(TicketQuery),
    responses(
        (status = 200, description = "List tickets", body = ApiResponse<TicketList>),
        (status = 400, description = "Invalid filter"),
    ),
    tag = "Tickets"
)]
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(query): Query<TicketQuery>,
) -> AppResult<Json<ApiResponse<TicketList>>> {
    let resp = ticket_service::list_tickets(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/user/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Tickets of a user, newest first", body = ApiResponse<TicketList>)
    ),
    tag = "Tickets"
)]
pub async fn list_user_tickets(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<ApiResponse<TicketList>>> {
    let resp = ticket_service::list_user_tickets(&state, user_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Get ticket", body = ApiResponse<Ticket>),
        (status = 404, description = "Ticket not found"),
    ),
    tag = "Tickets"
)]
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Ticket>>> {
    let resp = ticket_service::get_ticket(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/tickets/cancel/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 204, description = "Ticket canceled"),
        (status = 400, description = "Ticket already canceled"),
        (status = 404, description = "Ticket not found"),
    ),
    tag = "Tickets"
)]
pub async fn cancel_ticket(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    ticket_service::cancel_ticket(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/tickets/{id}/status",
    params(
        ("id" = i64, Path, description = "Ticket ID"),
        ("User-Id" = Option<i64>, Header, description = "Acting admin id"),
    ),
    request_body = TicketStatusUpdateRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<Ticket>),
        (status = 400, description = "Invalid status"),
        (status = 404, description = "Ticket not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn update_status(
    State(state): State<AppState>,
    admin: AdminActor,
    Path(id): Path<i64>,
    Json(mut payload): Json<TicketStatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<Ticket>>> {
    payload.updated_by = admin.updated_by(payload.updated_by.take());
    let resp = ticket_service::update_ticket_status(&state, id, admin.user_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/tickets/bulk-status",
    params(
        ("User-Id" = Option<i64>, Header, description = "Acting admin id"),
    ),
    request_body = BulkStatusUpdateRequest,
    responses(
        (status = 200, description = "Updated tickets", body = ApiResponse<TicketList>),
        (status = 400, description = "Empty id list or invalid status"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn bulk_update_status(
    State(state): State<AppState>,
    admin: AdminActor,
    Json(mut payload): Json<BulkStatusUpdateRequest>,
) -> AppResult<Json<ApiResponse<TicketList>>> {
    payload.updated_by = admin.updated_by(payload.updated_by.take());
    let resp = ticket_service::bulk_update_ticket_status(&state, admin.user_id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/statistics",
    responses(
        (status = 200, description = "Ticket counts by status", body = ApiResponse<TicketStatistics>)
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn ticket_statistics(
    State(state): State<AppState>,
    _admin: AdminActor,
) -> AppResult<Json<ApiResponse<TicketStatistics>>> {
    let resp = ticket_service::ticket_statistics(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/count",
    responses(
        (status = 200, description = "Number of tickets", body = ApiResponse<CountData>)
    ),
    tag = "Tickets"
)]
pub async fn count_tickets(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CountData>>> {
    let resp = ticket_service::count_tickets(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/{id}/history",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 200, description = "Status history, newest first", body = ApiResponse<TicketHistory>)
    ),
    tag = "Tickets"
)]
pub async fn ticket_history(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<TicketHistory>>> {
    let resp = ticket_service::ticket_history(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/tickets/available-seats",
    params(SeatQuery),
    responses(
        (status = 200, description = "Free seats for a departure", body = ApiResponse<AvailableSeats>),
        (status = 400, description = "Missing or invalid query"),
    ),
    tag = "Tickets"
)]
pub async fn available_seats(
    State(state): State<AppState>,
    Query(query): Query<SeatQuery>,
) -> AppResult<Json<ApiResponse<AvailableSeats>>> {
    let resp = ticket_service::available_seats_for(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/tickets/{id}",
    params(
        ("id" = i64, Path, description = "Ticket ID")
    ),
    responses(
        (status = 204, description = "Ticket deleted"),
        (status = 404, description = "Ticket not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Tickets"
)]
pub async fn delete_ticket(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    ticket_service::delete_ticket(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
