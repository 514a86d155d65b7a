use sea_orm::{ConnectionTrait, Statement};
use tokio::task::JoinSet;
use transit_booking_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{
        auth::{LoginRequest, RegisterRequest},
        users::UserRequest,
    },
    entity::users::{Entity as Users, UserRole},
    error::AppError,
    middleware::auth::{Caller, decode_token},
    services::{auth_service, user_service},
    state::AppState,
};

// Integration flow: register -> duplicate checks -> login -> admin edits.
#[tokio::test]
async fn register_login_and_manage_users_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    let registered = auth_service::register_user(
        &state,
        register("  kasun ", "kasun@example.com", Some("ADMIN")),
    )
    .await?
    .data
    .unwrap();
    assert_eq!(registered.username, "kasun");

    // auth registration ignores a requested role and never stores the raw password
    let stored = Users::find_by_username("kasun").one(&state.orm).await?.unwrap();
    assert_eq!(stored.role, UserRole::User);
    assert_ne!(stored.password_hash, "s3cret");
    assert!(stored.password_hash.starts_with("$argon2"));

    let dup_name = auth_service::register_user(&state, register("kasun", "other@example.com", None)).await;
    match dup_name {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Username already exists"),
        other => panic!("expected duplicate username error, got {other:?}"),
    }
    let dup_email =
        auth_service::register_user(&state, register("nadee", " kasun@example.com ", None)).await;
    match dup_email {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Email already exists"),
        other => panic!("expected duplicate email error, got {other:?}"),
    }

    let login = auth_service::login_user(&state, credentials("kasun", "s3cret"))
        .await?
        .data
        .unwrap();
    assert_eq!(login.role, UserRole::User);
    let claims = decode_token(&state.config, &login.token)?;
    assert_eq!(claims.user_id, Some(stored.id));

    let wrong = auth_service::login_user(&state, credentials("kasun", "nope")).await;
    assert!(matches!(wrong, Err(AppError::Unauthorized(_))));
    let unknown = user_service::login(&state, credentials("ghost", "s3cret")).await;
    assert!(matches!(unknown, Err(AppError::Unauthorized(_))));

    let profile = user_service::login(&state, credentials("kasun", "s3cret"))
        .await?
        .data
        .unwrap();
    assert_eq!(profile.email, "kasun@example.com");

    // an elevated role needs admin rights once admin auth is required
    let mut strict_config = (*state.config).clone();
    strict_config.require_admin_auth = true;
    let strict = AppState::new(state.orm.clone(), strict_config);
    let refused = user_service::register(
        &strict,
        &Caller(None),
        register("mallory", "mallory@example.com", Some("ADMIN")),
    )
    .await;
    assert!(matches!(refused, Err(AppError::Forbidden)));
    assert!(Users::find_by_username("mallory").one(&state.orm).await?.is_none());

    // permissive mode honours a requested role
    let admin = user_service::register(
        &state,
        &Caller(None),
        register("nadee", "nadee@example.com", Some("admin")),
    )
    .await?
        .data
        .unwrap();
    assert_eq!(admin.role, UserRole::Admin);

    let stats = user_service::user_statistics(&state).await?.data.unwrap();
    assert_eq!((stats.total, stats.admins, stats.users), (2, 1, 1));

    // update re-checks uniqueness against other users only
    let clash = user_service::update_user(
        &state,
        admin.id,
        UserRequest {
            email: Some("kasun@example.com".into()),
            ..Default::default()
        },
    )
    .await;
    assert!(matches!(clash, Err(AppError::BadRequest(_))));

    let updated = user_service::update_user(
        &state,
        admin.id,
        UserRequest {
            username: Some("nadee".into()),
            password: Some("new-pass".into()),
            phone_number: Some("0711111111".into()),
            role: Some("USER".into()),
            ..Default::default()
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(updated.role, UserRole::User);
    assert_eq!(updated.phone_number.as_deref(), Some("0711111111"));
    user_service::login(&state, credentials("nadee", "new-pass")).await?;

    let listed = auth_service::list_users(&state).await?.data.unwrap().items;
    assert_eq!(listed.len(), 2);

    user_service::delete_user(&state, admin.id).await?;
    let missing = user_service::get_user(&state, admin.id).await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    assert_eq!(user_service::count_users(&state).await?.data.unwrap().count, 1);

    // racing registrations for one username: the unique index decides, the losers get a 400
    let mut racers = JoinSet::new();
    for n in 0..4 {
        let state = state.clone();
        racers.spawn(async move {
            auth_service::register_user(&state, register("ravi", &format!("ravi{n}@example.com"), None))
                .await
        });
    }
    let mut winners = 0;
    while let Some(joined) = racers.join_next().await {
        match joined? {
            Ok(_) => winners += 1,
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Username already exists"),
            Err(other) => panic!("expected duplicate username error, got {other:?}"),
        }
    }
    assert_eq!(winners, 1);
    assert_eq!(user_service::count_users(&state).await?.data.unwrap().count, 2);

    Ok(())
}

fn register(username: &str, email: &str, role: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        username: Some(username.into()),
        password: Some("s3cret".into()),
        email: Some(email.into()),
        phone_number: None,
        role: role.map(str::to_string),
    }
}

fn credentials(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: Some(username.into()),
        password: Some(password.into()),
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE users RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(orm, AppConfig::for_tests(database_url)))
}
