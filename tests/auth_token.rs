use transit_booking_api::{
    config::AppConfig,
    entity::users::UserRole,
    error::AppError,
    middleware::auth::{AdminActor, AuthUser, Caller, decode_token, ensure_admin, issue_token},
};

#[test]
fn issued_token_decodes_to_same_identity() {
    let config = AppConfig::for_tests("postgres://unused");
    let token = issue_token(&config, "nimal", UserRole::User, Some(42)).unwrap();
    assert!(!token.starts_with("Bearer "));

    let user = decode_token(&config, &token).unwrap();
    assert_eq!(user.username, "nimal");
    assert_eq!(user.role, UserRole::User);
    assert_eq!(user.user_id, Some(42));
    assert!(matches!(ensure_admin(&user), Err(AppError::Forbidden)));
}

#[test]
fn token_signed_with_other_secret_is_rejected() {
    let config = AppConfig::for_tests("postgres://unused");
    let mut other = config.clone();
    other.jwt_secret = "another-secret".into();

    let token = issue_token(&other, "admin", UserRole::Admin, None).unwrap();
    let err = decode_token(&config, &token).unwrap_err();
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn admin_token_passes_admin_check() {
    let config = AppConfig::for_tests("postgres://unused");
    let token = issue_token(&config, "admin", UserRole::Admin, None).unwrap();
    let user = decode_token(&config, &token).unwrap();
    assert!(ensure_admin(&user).is_ok());
    assert_eq!(user.user_id, None);
}

fn user(role: UserRole) -> AuthUser {
    AuthUser {
        username: "nimal".into(),
        role,
        user_id: Some(42),
    }
}

#[test]
fn caller_admin_rights_follow_the_auth_mode() {
    let permissive = AppConfig::for_tests("postgres://unused");
    let mut strict = permissive.clone();
    strict.require_admin_auth = true;

    assert!(Caller(None).may_act_as_admin(&permissive));
    assert!(Caller(Some(user(UserRole::User))).may_act_as_admin(&permissive));

    assert!(!Caller(None).may_act_as_admin(&strict));
    assert!(!Caller(Some(user(UserRole::User))).may_act_as_admin(&strict));
    assert!(Caller(Some(user(UserRole::Admin))).may_act_as_admin(&strict));
}

#[test]
fn updated_by_defaults_to_token_username() {
    let with_token = AdminActor {
        user_id: 42,
        auth: Some(user(UserRole::Admin)),
    };
    assert_eq!(with_token.updated_by(None).as_deref(), Some("nimal"));
    assert_eq!(with_token.updated_by(Some("  ".into())).as_deref(), Some("nimal"));
    assert_eq!(
        with_token.updated_by(Some("ops-desk".into())).as_deref(),
        Some("ops-desk")
    );

    let anonymous = AdminActor {
        user_id: 1,
        auth: None,
    };
    assert_eq!(anonymous.updated_by(None), None);
}
