use sea_orm::{ConnectionTrait, Statement};
use transit_booking_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::{bus_routes::RouteRequest, schedules::ScheduleRequest},
    error::AppError,
    services::{route_service, schedule_service},
    state::AppState,
};

// Integration flow: routes and schedules persist and round-trip through their services.
#[tokio::test]
async fn routes_and_schedules_round_trip() -> anyhow::Result<()> {
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

    let created = route_service::create_route(&state, route_request("Colombo", 115.0))
        .await?
        .data
        .unwrap();
    let fetched = route_service::get_route(&state, created.id).await?.data.unwrap();
    assert_eq!(fetched.start_point, "Colombo");
    assert_eq!(fetched.end_point, "Kandy");
    assert_eq!(fetched.intermediate_stops.as_deref(), Some("Kegalle"));
    assert_eq!(fetched.distance, 115.0);
    assert_eq!(fetched.estimated_travel_time, "3h 30m");

    let replaced = route_service::update_route(&state, created.id, route_request("Negombo", 140.5))
        .await?
        .data
        .unwrap();
    assert_eq!(replaced.start_point, "Negombo");
    assert_eq!(replaced.distance, 140.5);

    let missing = route_service::update_route(&state, 9_999, route_request("X", 1.0)).await;
    assert!(matches!(missing, Err(AppError::NotFound)));

    let schedule = schedule_service::create_schedule(
        &state,
        ScheduleRequest {
            route_id: None,
            route_name: Some("Negombo - Kandy".into()),
            departure_time: Some("06:00".into()),
            arrival_time: Some("09:30".into()),
            frequency: Some("Daily".into()),
            available_seats: Some(50),
        },
    )
    .await?
    .data
    .unwrap();
    assert_eq!(schedule.route_id, None);

    let assigned = schedule_service::assign_route(&state, schedule.id, created.id)
        .await?
        .data
        .unwrap();
    assert_eq!(assigned.route_id, Some(created.id));

    let by_route = schedule_service::list_schedules_by_route(&state, created.id)
        .await?
        .data
        .unwrap()
        .items;
    assert_eq!(by_route.len(), 1);
    assert_eq!(by_route[0].departure_time, "06:00");

    assert_eq!(route_service::count_routes(&state).await?.data.unwrap().count, 1);
    assert_eq!(schedule_service::count_schedules(&state).await?.data.unwrap().count, 1);

    schedule_service::delete_schedule(&state, schedule.id).await?;
    route_service::delete_route(&state, created.id).await?;
    let gone = route_service::get_route(&state, created.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));
    let gone = route_service::delete_route(&state, created.id).await;
    assert!(matches!(gone, Err(AppError::NotFound)));

    Ok(())
}

fn route_request(start: &str, distance: f64) -> RouteRequest {
    RouteRequest {
        start_point: Some(start.into()),
        end_point: Some("Kandy".into()),
        intermediate_stops: Some("Kegalle".into()),
        distance: Some(distance),
        estimated_travel_time: Some("3h 30m".into()),
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;

    let backend = orm.get_database_backend();
    orm.execute(Statement::from_string(
        backend,
        "TRUNCATE TABLE schedules, routes RESTART IDENTITY CASCADE",
    ))
    .await?;

    Ok(AppState::new(orm, AppConfig::for_tests(database_url)))
}
