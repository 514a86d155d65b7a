use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use crate::{
    dto::{
        CountData,
        schedules::{ScheduleList, ScheduleRequest},
    },
    entity::schedules::{ActiveModel, Entity as Schedules},
    error::{AppError, AppResult},
    models::Schedule,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{SEAT_CAPACITY, parse_clock_time, require_text},
};

struct ScheduleFields {
    route_id: Option<i64>,
    route_name: String,
    departure_time: String,
    arrival_time: String,
    frequency: String,
    available_seats: Option<i32>,
}

fn validate_schedule(payload: ScheduleRequest) -> AppResult<ScheduleFields> {
    let route_name = require_text(payload.route_name.as_deref(), "Route name is required")?;
    let departure_time = parse_clock_time(payload.departure_time.as_deref(), "Departure time")?;
    let arrival_time = parse_clock_time(payload.arrival_time.as_deref(), "Arrival time")?;
    let frequency = require_text(payload.frequency.as_deref(), "Frequency is required")?;
    if let Some(seats) = payload.available_seats {
        if !(0..=SEAT_CAPACITY).contains(&seats) {
            return Err(AppError::BadRequest(format!(
                "Available seats must be between 0 and {SEAT_CAPACITY}"
            )));
        }
    }

    Ok(ScheduleFields {
        route_id: payload.route_id,
        route_name,
        departure_time,
        arrival_time,
        frequency,
        available_seats: payload.available_seats,
    })
}

fn schedule_list(models: Vec<crate::entity::schedules::Model>) -> (ScheduleList, Meta) {
    let items: Vec<Schedule> = models.into_iter().map(Schedule::from).collect();
    let meta = Meta::unpaged(items.len());
    (ScheduleList { items }, meta)
}

pub async fn list_schedules(state: &AppState) -> AppResult<ApiResponse<ScheduleList>> {
    let (list, meta) = schedule_list(Schedules::find_ordered().all(&state.orm).await?);
    Ok(ApiResponse::success("Schedules", list, Some(meta)))
}

pub async fn list_schedules_by_route(
    state: &AppState,
    route_id: i64,
) -> AppResult<ApiResponse<ScheduleList>> {
    let (list, meta) = schedule_list(Schedules::find_by_route_id(route_id).all(&state.orm).await?);
    Ok(ApiResponse::success("Schedules", list, Some(meta)))
}

pub async fn count_schedules(state: &AppState) -> AppResult<ApiResponse<CountData>> {
    let count = Schedules::find().count(&state.orm).await? as i64;
    Ok(ApiResponse::success("Schedule count", CountData { count }, None))
}

pub async fn get_schedule(state: &AppState, id: i64) -> AppResult<ApiResponse<Schedule>> {
    let schedule = Schedules::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Schedule::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Schedule", schedule, None))
}

pub async fn create_schedule(
    state: &AppState,
    payload: ScheduleRequest,
) -> AppResult<ApiResponse<Schedule>> {
    let fields = validate_schedule(payload)?;
    let schedule = ActiveModel {
        id: NotSet,
        route_id: Set(fields.route_id),
        route_name: Set(fields.route_name),
        departure_time: Set(fields.departure_time),
        arrival_time: Set(fields.arrival_time),
        frequency: Set(fields.frequency),
        available_seats: Set(fields.available_seats),
    }
    .insert(&state.orm)
    .await?;
    tracing::info!(schedule_id = schedule.id, "schedule created");

    Ok(ApiResponse::success(
        "Schedule created",
        Schedule::from(schedule),
        Some(Meta::empty()),
    ))
}

pub async fn update_schedule(
    state: &AppState,
    id: i64,
    payload: ScheduleRequest,
) -> AppResult<ApiResponse<Schedule>> {
    let fields = validate_schedule(payload)?;
    let existing = Schedules::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.route_id = Set(fields.route_id);
    active.route_name = Set(fields.route_name);
    active.departure_time = Set(fields.departure_time);
    active.arrival_time = Set(fields.arrival_time);
    active.frequency = Set(fields.frequency);
    active.available_seats = Set(fields.available_seats);
    let schedule = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Schedule updated",
        Schedule::from(schedule),
        Some(Meta::empty()),
    ))
}

/// Links a schedule to a route id. The route itself lives in another service and is not checked.
pub async fn assign_route(
    state: &AppState,
    id: i64,
    route_id: i64,
) -> AppResult<ApiResponse<Schedule>> {
    let existing = Schedules::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.route_id = Set(Some(route_id));
    let schedule = active.update(&state.orm).await?;
    tracing::info!(schedule_id = id, route_id, "schedule assigned to route");

    Ok(ApiResponse::success(
        "Schedule assigned to route",
        Schedule::from(schedule),
        Some(Meta::empty()),
    ))
}

pub async fn delete_schedule(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = Schedules::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }

    Ok(ApiResponse::success(
        "Schedule deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
