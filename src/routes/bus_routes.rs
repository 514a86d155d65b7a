use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::{
        CountData,
        bus_routes::{RouteList, RouteRequest},
    },
    error::AppResult,
    middleware::auth::AdminActor,
    models::Route,
    response::ApiResponse,
    services::route_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/admin/routes", get(list_routes_admin))
        .route("/count", get(count_routes))
        .route(
            "/{id}",
            get(get_route).put(update_route).delete(delete_route),
        )
}

#[utoipa::path(
    get,
    path = "/api/routes",
    responses(
        (status = 200, description = "List routes", body = ApiResponse<RouteList>)
    ),
    tag = "Routes"
)]
pub async fn list_routes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<RouteList>>> {
    let resp = route_service::list_routes(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/routes/admin/routes",
    responses(
        (status = 200, description = "List routes (admin view)", body = ApiResponse<RouteList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn list_routes_admin(
    State(state): State<AppState>,
    _admin: AdminActor,
) -> AppResult<Json<ApiResponse<RouteList>>> {
    let resp = route_service::list_routes(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/routes/count",
    responses(
        (status = 200, description = "Number of routes", body = ApiResponse<CountData>)
    ),
    tag = "Routes"
)]
pub async fn count_routes(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CountData>>> {
    let resp = route_service::count_routes(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/routes/{id}",
    params(
        ("id" = i64, Path, description = "Route ID")
    ),
    responses(
        (status = 200, description = "Get route", body = ApiResponse<Route>),
        (status = 404, description = "Route not found"),
    ),
    tag = "Routes"
)]
pub async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<Route>>> {
    let resp = route_service::get_route(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = RouteRequest,
    responses(
        (status = 201, description = "Create route", body = ApiResponse<Route>),
        (status = 400, description = "Validation failed"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn create_route(
    State(state): State<AppState>,
    _admin: AdminActor,
    Json(payload): Json<RouteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Route>>)> {
    let resp = route_service::create_route(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/routes/{id}",
    params(
        ("id" = i64, Path, description = "Route ID")
    ),
    request_body = RouteRequest,
    responses(
        (status = 200, description = "Updated route", body = ApiResponse<Route>),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Route not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn update_route(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
    Json(payload): Json<RouteRequest>,
) -> AppResult<Json<ApiResponse<Route>>> {
    let resp = route_service::update_route(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/routes/{id}",
    params(
        ("id" = i64, Path, description = "Route ID")
    ),
    responses(
        (status = 200, description = "Deleted route"),
        (status = 404, description = "Route not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn delete_route(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = route_service::delete_route(&state, id).await?;
    Ok(Json(resp))
}
