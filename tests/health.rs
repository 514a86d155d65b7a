use axum::extract::State;
use sea_orm::DatabaseConnection;
use transit_booking_api::{
    config::{AppConfig, ServiceKind},
    routes::health::health_check,
    state::AppState,
};

#[tokio::test]
async fn health_check_returns_ok() {
    let state = AppState::new(
        DatabaseConnection::Disconnected,
        AppConfig::for_tests("postgres://unused"),
    );
    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(
        data.services,
        vec!["routes", "schedules", "tickets", "users", "auth"]
    );
}

#[tokio::test]
async fn health_check_lists_only_enabled_services() {
    let mut config = AppConfig::for_tests("postgres://unused");
    config.services = vec![ServiceKind::Tickets];
    let state = AppState::new(DatabaseConnection::Disconnected, config);

    let data = health_check(State(state)).await.0.data.expect("health data");
    assert_eq!(data.services, vec!["tickets"]);
}
