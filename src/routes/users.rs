use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};

use crate::{
    dto::{
        CountData,
        auth::{LoginRequest, RegisterRequest},
        users::{UserList, UserRequest, UserStatistics},
    },
    error::AppResult,
    middleware::auth::{AdminActor, Caller},
    models::User,
    response::ApiResponse,
    services::{auth_service, user_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/statistics", get(user_statistics))
        .route("/count", get(count_users))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
}

#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = ApiResponse<User>),
        (status = 400, description = "Missing field or duplicate username/email"),
        (status = 403, description = "Role other than USER requested without admin rights"),
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = user_service::register(&state, &caller, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Credentials valid", body = ApiResponse<User>),
        (status = 401, description = "Invalid username or password"),
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::login(&state, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List users", body = ApiResponse<UserList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminActor,
) -> AppResult<Json<ApiResponse<UserList>>> {
    let resp = auth_service::list_users(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/statistics",
    responses(
        (status = 200, description = "User counts by role", body = ApiResponse<UserStatistics>)
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn user_statistics(
    State(state): State<AppState>,
    _admin: AdminActor,
) -> AppResult<Json<ApiResponse<UserStatistics>>> {
    let resp = user_service::user_statistics(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/count",
    responses(
        (status = 200, description = "Number of users", body = ApiResponse<CountData>)
    ),
    tag = "Users"
)]
pub async fn count_users(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CountData>>> {
    let resp = user_service::count_users(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Get user", body = ApiResponse<User>),
        (status = 404, description = "User not found"),
    ),
    tag = "Users"
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::get_user(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 400, description = "Missing field or duplicate username/email"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn create_user(
    State(state): State<AppState>,
    _admin: AdminActor,
    Json(payload): Json<UserRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<User>>)> {
    let resp = user_service::create_user(&state, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<User>),
        (status = 400, description = "Duplicate username/email"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn update_user(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
    Json(payload): Json<UserRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = user_service::update_user(&state, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Users"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    user_service::delete_user(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
