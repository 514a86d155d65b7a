use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

use crate::{
    dto::{
        CountData,
        auth::{LoginRequest, RegisterRequest},
        users::{UserRequest, UserStatistics},
    },
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users, UserRole},
    error::{AppError, AppResult},
    middleware::auth::Caller,
    models::User,
    response::{ApiResponse, Meta},
    services::auth_service::{
        authenticate, create_account, ensure_unique, hash_password, login_fields, unique_violation,
    },
    state::AppState,
    validation::{optional_text, require_text},
};

fn parse_role(value: Option<&str>) -> AppResult<UserRole> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(role) => role.parse::<UserRole>().map_err(AppError::BadRequest),
        None => Ok(UserRole::User),
    }
}

/// Self-service registration. Only a caller allowed to act as admin may ask for a non-USER role.
pub async fn register(
    state: &AppState,
    caller: &Caller,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let role = parse_role(payload.role.as_deref())?;
    if role != UserRole::User && !caller.may_act_as_admin(&state.config) {
        tracing::warn!(role = role.as_str(), "role escalation at registration refused");
        return Err(AppError::Forbidden);
    }
    let user = create_account(state, payload, role).await?;
    Ok(ApiResponse::success(
        "User registered successfully",
        User::from(user),
        Some(Meta::empty()),
    ))
}

/// Credential check without a token; returns the stored profile.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<User>> {
    let (username, password) = login_fields(&payload)?;
    let user = authenticate(state, &username, password).await?;
    Ok(ApiResponse::success(
        "Login successful",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn user_statistics(state: &AppState) -> AppResult<ApiResponse<UserStatistics>> {
    let total = Users::find().count(&state.orm).await? as i64;
    let admins = Users::find()
        .filter(UserCol::Role.eq(UserRole::Admin))
        .count(&state.orm)
        .await? as i64;

    Ok(ApiResponse::success(
        "User statistics",
        UserStatistics {
            total,
            admins,
            users: total - admins,
        },
        None,
    ))
}

pub async fn count_users(state: &AppState) -> AppResult<ApiResponse<CountData>> {
    let count = Users::find().count(&state.orm).await? as i64;
    Ok(ApiResponse::success("User count", CountData { count }, None))
}

pub async fn get_user(state: &AppState, id: i64) -> AppResult<ApiResponse<User>> {
    let user = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .map(User::from)
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("User", user, None))
}

pub async fn create_user(state: &AppState, payload: UserRequest) -> AppResult<ApiResponse<User>> {
    let role = parse_role(payload.role.as_deref())?;
    let request = RegisterRequest {
        username: payload.username,
        password: payload.password,
        email: payload.email,
        phone_number: payload.phone_number,
        role: None,
    };
    let user = create_account(state, request, role).await?;
    Ok(ApiResponse::success(
        "User created",
        User::from(user),
        Some(Meta::empty()),
    ))
}

/// Absent fields keep their stored value. A new password is hashed before it is stored.
pub async fn update_user(
    state: &AppState,
    id: i64,
    payload: UserRequest,
) -> AppResult<ApiResponse<User>> {
    let existing = Users::find_by_id(id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;

    let username = match payload.username.as_deref() {
        Some(v) => require_text(Some(v), "Username is required")?,
        None => existing.username.clone(),
    };
    let email = match payload.email.as_deref() {
        Some(v) => require_text(Some(v), "Email is required")?,
        None => existing.email.clone(),
    };
    let role = match payload.role.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse::<UserRole>().map_err(AppError::BadRequest)?,
        None => existing.role,
    };
    let password_hash = match payload.password.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(p) => Some(hash_password(p)?),
        None => None,
    };

    ensure_unique(state, &username, &email, Some(id)).await?;

    let mut active: UserActive = existing.into();
    active.username = Set(username);
    active.email = Set(email);
    active.role = Set(role);
    if payload.phone_number.is_some() {
        active.phone_number = Set(optional_text(payload.phone_number));
    }
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    let user = active.update(&state.orm).await.map_err(unique_violation)?;
    tracing::info!(user_id = user.id, "user updated");

    Ok(ApiResponse::success(
        "User updated",
        User::from(user),
        Some(Meta::empty()),
    ))
}

pub async fn delete_user(state: &AppState, id: i64) -> AppResult<()> {
    let result = Users::delete_by_id(id).exec(&state.orm).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(user_id = id, "user deleted");
    Ok(())
}
