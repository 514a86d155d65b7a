use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::{
    dto::{
        CountData,
        schedules::{ScheduleList, ScheduleRequest},
    },
    error::AppResult,
    middleware::auth::AdminActor,
    models::Schedule,
    response::ApiResponse,
    services::schedule_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_schedules).post(create_schedule))
        .route("/count", get(count_schedules))
        .route("/route/{route_id}", get(list_schedules_by_route))
        .route(
            "/{id}",
            get(get_schedule).put(update_schedule).delete(delete_schedule),
        )
        .route("/{id}/assign-route/{route_id}", put(assign_route))
}

#[utoipa::path(
    get,
    path = "/api/schedules",
    responses(
        (status = 200, description = "List schedules", body = ApiResponse<ScheduleList>)
    ),
    tag = "Schedules"
)]
pub async fn list_schedules(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<ScheduleList>>> {
    let resp = schedule_service::list_schedules(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/schedules/count",
    responses(
        (status = 200, description = "Number of schedules", body = ApiResponse<CountData>)
    ),
    tag = "Schedules"
)]
pub async fn count_schedules(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CountData>>> {
    let resp = schedule_service::count_schedules(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/schedules/route/{route_id}",
    params(
        ("route_id" = i64, Path, description = "Route ID")
    ),
    responses(
        (status = 200, description = "Schedules assigned to a route", body = ApiResponse<ScheduleList>)
    ),
    tag = "Schedules"
)]
pub async fn list_schedules_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<i64>,
) -> AppResult<Json<ApiResponse<ScheduleList>>> {
    let resp = schedule_service::list_schedules_by_route(&state, route_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/schedules/{id}",
    params(
        ("id" = i64, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Get schedule", body = ApiResponse<Schedule>),
        (status = 404, description = "Schedule not found"),
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Schedule>>> {
    let resp = schedule_service::get_schedule(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/schedules",
    request_body = ScheduleRequest,
    responses(
        (status = 201, description = "Create schedule", body = ApiResponse<Schedule>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    _admin: AdminActor,
    Json(payload): Json<ScheduleRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Schedule>>)> {
    let resp = schedule_service::create_schedule(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}",
    params(
        ("id" = i64, Path, description = "Schedule ID")
    ),
    request_body = ScheduleRequest,
    responses(
        (status = 200, description = "Updated schedule", body = ApiResponse<Schedule>),
        (status = 404, description = "Schedule not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
    Json(payload): Json<ScheduleRequest>,
) -> AppResult<Json<ApiResponse<Schedule>>> {
    let resp = schedule_service::update_schedule(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/schedules/{id}/assign-route/{route_id}",
    params(
        ("id" = i64, Path, description = "Schedule ID"),
        ("route_id" = i64, Path, description = "Route ID"),
    ),
    responses(
        (status = 200, description = "Schedule assigned", body = ApiResponse<Schedule>),
        (status = 404, description = "Schedule not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn assign_route(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path((id, route_id)): Path<(i64, i64)>,
) -> AppResult<Json<ApiResponse<Schedule>>> {
    let resp = schedule_service::assign_route(&state, id, route_id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/schedules/{id}",
    params(
        ("id" = i64, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Deleted schedule"),
        (status = 404, description = "Schedule not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = schedule_service::delete_schedule(&state, id).await?;
    Ok(Json(resp))
}
