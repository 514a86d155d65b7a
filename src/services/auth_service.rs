use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DbErr, Set, SqlErr};

use crate::{
    dto::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
    dto::users::UserList,
    entity::users::{ActiveModel as UserActive, Entity as Users, Model as UserModel, UserRole},
    error::{AppError, AppResult},
    middleware::auth::issue_token,
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
    validation::{optional_text, require_text},
};

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Rejects a username or email already used by a user other than `exclude_id`.
pub(crate) async fn ensure_unique(
    state: &AppState,
    username: &str,
    email: &str,
    exclude_id: Option<i64>,
) -> AppResult<()> {
    let taken_by_other = |user: &UserModel| Some(user.id) != exclude_id;

    if let Some(user) = Users::find_by_username(username).one(&state.orm).await? {
        if taken_by_other(&user) {
            return Err(AppError::BadRequest("Username already exists".into()));
        }
    }
    if let Some(user) = Users::find_by_email(email).one(&state.orm).await? {
        if taken_by_other(&user) {
            return Err(AppError::BadRequest("Email already exists".into()));
        }
    }
    Ok(())
}

/// A concurrent writer can pass the pre-check and lose at the unique index. Report it the same way.
pub(crate) fn unique_violation(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) if detail.contains("email") => {
            AppError::BadRequest("Email already exists".into())
        }
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::BadRequest("Username already exists".into())
        }
        _ => AppError::OrmError(err),
    }
}

/// Validates, checks uniqueness, hashes the password and inserts the user.
pub(crate) async fn create_account(
    state: &AppState,
    payload: RegisterRequest,
    role: UserRole,
) -> AppResult<UserModel> {
    let username = require_text(payload.username.as_deref(), "Username is required")?;
    let password = match payload.password.as_deref() {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(AppError::BadRequest("Password is required".into())),
    };
    let email = require_text(payload.email.as_deref(), "Email is required")?;

    ensure_unique(state, &username, &email, None).await?;

    let user = UserActive {
        id: NotSet,
        username: Set(username),
        password_hash: Set(hash_password(password)?),
        email: Set(email),
        phone_number: Set(optional_text(payload.phone_number)),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(unique_violation)?;

    tracing::info!(user_id = user.id, username = %user.username, role = user.role.as_str(), "user registered");
    Ok(user)
}

/// Looks the user up by username and checks the password hash. Any mismatch is a 401.
pub(crate) async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> AppResult<UserModel> {
    let Some(user) = Users::find_by_username(username).one(&state.orm).await? else {
        tracing::warn!(%username, "login failed: unknown user");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    };

    if !verify_password(password, &user.password_hash)? {
        tracing::warn!(%username, "login failed: wrong password");
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
    }
    Ok(user)
}

pub(crate) fn login_fields(payload: &LoginRequest) -> AppResult<(String, &str)> {
    let username = require_text(payload.username.as_deref(), "Username is required")?;
    let password = match payload.password.as_deref() {
        Some(p) if !p.trim().is_empty() => p,
        _ => return Err(AppError::BadRequest("Password is required".into())),
    };
    Ok((username, password))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let user = create_account(state, payload, UserRole::User).await?;
    Ok(ApiResponse::success(
        "User registered successfully",
        RegisterResponse {
            username: user.username,
        },
        Some(Meta::empty()),
    ))
}

/// The configured admin account is checked before the `users` table and has no user id.
pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let (username, password) = login_fields(&payload)?;
    let config = &state.config;

    let (role, user_id) = if username == config.admin_username && password == config.admin_password
    {
        (UserRole::Admin, None)
    } else {
        let user = authenticate(state, &username, password).await?;
        (user.role, Some(user.id))
    };

    let token = issue_token(config, &username, role, user_id)?;
    tracing::info!(%username, role = role.as_str(), "login succeeded");

    Ok(ApiResponse::success(
        "Logged in",
        LoginResponse {
            token,
            role,
            username,
        },
        Some(Meta::empty()),
    ))
}

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let items: Vec<User> = Users::find_ordered()
        .all(&state.orm)
        .await?
        .into_iter()
        .map(User::from)
        .collect();

    let meta = Meta::unpaged(items.len());
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}
