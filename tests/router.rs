use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;
use transit_booking_api::{
    config::{AppConfig, ServiceKind},
    entity::users::UserRole,
    middleware::auth::issue_token,
    routes::build_app,
    state::AppState,
};

// None of these requests reach the database; the ORM handle is disconnected.
fn app_with(config: AppConfig) -> Router {
    build_app(AppState::new(DatabaseConnection::Disconnected, config))
}

fn app() -> Router {
    app_with(AppConfig::for_tests("postgres://unused"))
}

fn strict_config() -> AppConfig {
    let mut config = AppConfig::for_tests("postgres://unused");
    config.require_admin_auth = true;
    config
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn unknown_path_returns_not_found_envelope() {
    let request = Request::get("/api/nowhere").body(Body::empty()).unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["data"]["path"], "/api/nowhere");
}

#[tokio::test]
async fn responses_carry_request_id() {
    let request = Request::get("/health").body(Body::empty()).unwrap();
    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn disabled_service_is_not_mounted() {
    let mut config = AppConfig::for_tests("postgres://unused");
    config.services = vec![ServiceKind::Tickets];

    let request = json_request("POST", "/api/routes", json!({}));
    let (status, _) = send(app_with(config), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_route_reports_first_validation_failure() {
    let request = json_request(
        "POST",
        "/api/routes",
        json!({ "startPoint": "Colombo", "endPoint": "Kandy", "distance": 0 }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Distance must be positive");
    assert_eq!(body["data"]["error"], "Distance must be positive");
}

#[tokio::test]
async fn create_schedule_rejects_malformed_time() {
    let request = json_request(
        "POST",
        "/api/schedules",
        json!({
            "routeName": "Colombo - Kandy",
            "departureTime": "six",
            "arrivalTime": "09:30",
            "frequency": "Daily"
        }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Departure time must be formatted as HH:MM");
}

#[tokio::test]
async fn booking_rejects_seat_outside_capacity() {
    let request = json_request(
        "POST",
        "/api/tickets/book",
        json!({
            "passengerName": "Amaya",
            "email": "amaya@example.com",
            "phoneNumber": "0771234567",
            "routeName": "Colombo - Kandy",
            "travelDateTime": "2025-06-01T06:00",
            "seatNumber": 51,
            "price": 850.0
        }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Seat number must be between 1 and 50");
}

#[tokio::test]
async fn status_update_rejects_unknown_status() {
    let request = json_request("PUT", "/api/tickets/7/status", json!({ "status": "LOST" }));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("Invalid ticket status"));
}

#[tokio::test]
async fn bulk_update_requires_ticket_ids() {
    let request = json_request(
        "PUT",
        "/api/tickets/bulk-status",
        json!({ "ticketIds": [], "status": "CONFIRMED" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Ticket ids are required");
}

#[tokio::test]
async fn malformed_user_id_header_is_rejected() {
    let mut request = json_request("PUT", "/api/tickets/7/status", json!({ "status": "CONFIRMED" }));
    request
        .headers_mut()
        .insert("User-Id", "not-a-number".parse().unwrap());
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid User-Id header");
}

#[tokio::test]
async fn available_seats_requires_query() {
    let request = Request::get("/api/tickets/available-seats?routeName=Colombo")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "travelDateTime is required");
}

#[tokio::test]
async fn configured_admin_logs_in_without_database() {
    let request = json_request(
        "POST",
        "/api/auth/login",
        json!({ "username": "admin", "password": "admin123" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["role"], "ADMIN");
    assert_eq!(body["data"]["username"], "admin");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_requires_password() {
    let request = json_request("POST", "/api/auth/login", json!({ "username": "admin" }));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Password is required");
}

#[tokio::test]
async fn register_requires_email() {
    let request = json_request(
        "POST",
        "/api/auth/register",
        json!({ "username": "kasun", "password": "secret" }),
    );
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is required");
}

#[tokio::test]
async fn strict_mode_requires_a_token_for_admin_operations() {
    let request = json_request("POST", "/api/routes", json!({}));
    let (status, _) = send(app_with(strict_config()), request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn strict_mode_forbids_non_admin_tokens() {
    let config = strict_config();
    let token = issue_token(&config, "kasun", UserRole::User, Some(5)).unwrap();

    let mut request = json_request("POST", "/api/routes", json!({}));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    let (status, _) = send(app_with(config), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn strict_mode_lets_admin_token_through() {
    let config = strict_config();
    let token = issue_token(&config, "admin", UserRole::Admin, None).unwrap();

    let mut request = json_request("POST", "/api/routes", json!({}));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    let (status, body) = send(app_with(config), request).await;

    // past the auth check, the empty body fails validation
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Start point is required");
}

#[tokio::test]
async fn permissive_mode_ignores_garbage_tokens() {
    let mut request = json_request("POST", "/api/routes", json!({}));
    request
        .headers_mut()
        .insert(header::AUTHORIZATION, "Bearer nonsense".parse().unwrap());
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Start point is required");
}

#[tokio::test]
async fn status_update_requires_status() {
    let request = json_request("PUT", "/api/tickets/7/status", json!({ "reason": "late" }));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Status is required");
}

#[tokio::test]
async fn bulk_update_requires_status() {
    let request = json_request("PUT", "/api/tickets/bulk-status", json!({ "ticketIds": [1, 2] }));
    let (status, body) = send(app(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Status is required");
}

#[tokio::test]
async fn strict_mode_refuses_self_registration_as_admin() {
    let request = json_request(
        "POST",
        "/api/users/register",
        json!({
            "username": "mallory",
            "password": "secret",
            "email": "mallory@example.com",
            "role": "ADMIN"
        }),
    );
    let (status, _) = send(app_with(strict_config()), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn strict_mode_refuses_admin_registration_with_user_token() {
    let config = strict_config();
    let token = issue_token(&config, "kasun", UserRole::User, Some(5)).unwrap();

    let mut request = json_request(
        "POST",
        "/api/users/register",
        json!({
            "username": "mallory",
            "password": "secret",
            "email": "mallory@example.com",
            "role": "admin"
        }),
    );
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    let (status, _) = send(app_with(config), request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
