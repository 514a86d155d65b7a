use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::{
    config::AppConfig,
    dto::auth::Claims,
    entity::users::UserRole,
    error::{AppError, AppResult},
    state::AppState,
};

/// Acting admin recorded in the status ledger when nothing identifies the caller.
pub const DEFAULT_ADMIN_USER_ID: i64 = 1;
pub const USER_ID_HEADER: &str = "user-id";

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: UserRole,
    pub user_id: Option<i64>,
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    if user.role != UserRole::Admin {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn issue_token(
    config: &AppConfig,
    username: &str,
    role: UserRole,
    user_id: Option<i64>,
) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(config.jwt_ttl_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: username.to_string(),
        role,
        uid: user_id,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(config: &AppConfig, token: &str) -> AppResult<AuthUser> {
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;

    Ok(AuthUser {
        username: decoded.claims.sub,
        role: decoded.claims.role,
        user_id: decoded.claims.uid,
    })
}

fn bearer_token(parts: &Parts) -> AppResult<Option<&str>> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AppError::Unauthorized("Invalid Authorization header".into()))?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) => Ok(Some(token.trim())),
        None => Err(AppError::Unauthorized("Invalid Authorization scheme".into())),
    }
}

/// Bearer identity of an open endpoint. A missing or unusable token yields `None`.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<AuthUser>);

impl Caller {
    /// Whether this caller may do what admin-only endpoints do.
    pub fn may_act_as_admin(&self, config: &AppConfig) -> bool {
        match &self.0 {
            _ if !config.require_admin_auth => true,
            Some(user) => user.role == UserRole::Admin,
            None => false,
        }
    }
}

impl FromRequestParts<AppState> for Caller {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match bearer_token(parts) {
            Ok(Some(token)) => decode_token(&state.config, token).ok(),
            _ => None,
        };
        Ok(Caller(user))
    }
}

/// Caller of an admin operation.
///
/// With `require_admin_auth` off, any request passes and a bad or non-admin
/// token is ignored. With it on, a valid admin Bearer token is mandatory.
/// The acting id comes from the `User-Id` header, then the token, then
/// [`DEFAULT_ADMIN_USER_ID`].
#[derive(Debug, Clone)]
pub struct AdminActor {
    pub user_id: i64,
    pub auth: Option<AuthUser>,
}

impl AdminActor {
    /// `updatedBy` for a status change: the requested value, else the token's username.
    pub fn updated_by(&self, requested: Option<String>) -> Option<String> {
        requested
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.auth.as_ref().map(|user| user.username.clone()))
    }
}

impl FromRequestParts<AppState> for AdminActor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let strict = state.config.require_admin_auth;

        let auth = match bearer_token(parts) {
            Ok(Some(token)) => match decode_token(&state.config, token) {
                Ok(user) => Some(user),
                Err(err) if strict => return Err(err),
                Err(_) => None,
            },
            Ok(None) => None,
            Err(err) if strict => return Err(err),
            Err(_) => None,
        };

        if strict {
            match &auth {
                Some(user) => ensure_admin(user)?,
                None => {
                    return Err(AppError::Unauthorized(
                        "Missing Authorization header".into(),
                    ));
                }
            }
        }

        let header_id = match parts.headers.get(USER_ID_HEADER) {
            Some(value) => Some(
                value
                    .to_str()
                    .ok()
                    .and_then(|v| v.trim().parse::<i64>().ok())
                    .ok_or_else(|| AppError::BadRequest("Invalid User-Id header".into()))?,
            ),
            None => None,
        };

        let user_id = header_id
            .or_else(|| auth.as_ref().and_then(|user| user.user_id))
            .unwrap_or(DEFAULT_ADMIN_USER_ID);

        Ok(AdminActor { user_id, auth })
    }
}
