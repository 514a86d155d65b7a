use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, PaginatorTrait, Set};

use crate::{
    dto::{
        CountData,
        bus_routes::{RouteList, RouteRequest},
    },
    entity::bus_routes::{ActiveModel, Entity as BusRoutes},
    error::{AppError, AppResult},
    models::Route,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{optional_text, require_text},
};

/// Validated column values for an insert or a full replace.
struct RouteFields {
    start_point: String,
    end_point: String,
    intermediate_stops: Option<String>,
    distance: f64,
    estimated_travel_time: String,
}

fn validate_route(payload: RouteRequest) -> AppResult<RouteFields> {
    let start_point = require_text(payload.start_point.as_deref(), "Start point is required")?;
    let end_point = require_text(payload.end_point.as_deref(), "End point is required")?;
    let distance = match payload.distance {
        Some(d) if d.is_finite() && d > 0.0 => d,
        _ => return Err(AppError::BadRequest("Distance must be positive".into())),
    };
    let estimated_travel_time = require_text(
        payload.estimated_travel_time.as_deref(),
        "Estimated travel time is required",
    )?;

    Ok(RouteFields {
        start_point,
        end_point,
        intermediate_stops: optional_text(payload.intermediate_stops),
        distance,
        estimated_travel_time,
    })
}

pub async fn list_routes(state: &AppState) -> AppResult<ApiResponse<RouteList>> {
    let items: Vec<Route> = BusRoutes::find_ordered()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Route::from)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Routes", RouteList { items }, Some(meta)))
}

pub async fn count_routes(state: &AppState) -> AppResult<ApiResponse<CountData>> {
    let count = BusRoutes::find().count(&state.orm).await? as i64;
    Ok(ApiResponse::success("Route count", CountData { count }, None))
}

pub async fn get_route(state: &AppState, id: i64) -> AppResult<ApiResponse<Route>> {
    let route = BusRoutes::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(Route::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Route", route, None))
}

pub async fn create_route(
    state: &AppState,
    payload: RouteRequest,
) -> AppResult<ApiResponse<Route>> {
    let fields = validate_route(payload)?;
    let active = ActiveModel {
        id: NotSet,
        start_point: Set(fields.start_point),
        end_point: Set(fields.end_point),
        intermediate_stops: Set(fields.intermediate_stops),
        distance: Set(fields.distance),
        estimated_travel_time: Set(fields.estimated_travel_time),
    };
    let route = active.insert(&state.orm).await?;
    tracing::info!(route_id = route.id, "route created");

    Ok(ApiResponse::success(
        "Route created",
        Route::from(route),
        Some(Meta::empty()),
    ))
}

pub async fn update_route(
    state: &AppState,
    id: i64,
    payload: RouteRequest,
) -> AppResult<ApiResponse<Route>> {
    let fields = validate_route(payload)?;
    let existing = BusRoutes::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let mut active: ActiveModel = existing.into();
    active.start_point = Set(fields.start_point);
    active.end_point = Set(fields.end_point);
    active.intermediate_stops = Set(fields.intermediate_stops);
    active.distance = Set(fields.distance);
    active.estimated_travel_time = Set(fields.estimated_travel_time);
    let route = active.update(&state.orm).await?;
    tracing::info!(route_id = route.id, "route updated");

    Ok(ApiResponse::success(
        "Route updated",
        Route::from(route),
        Some(Meta::empty()),
    ))
}

pub async fn delete_route(
    state: &AppState,
    id: i64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let result = BusRoutes::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(route_id = id, "route deleted");

    Ok(ApiResponse::success(
        "Route deleted successfully",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
