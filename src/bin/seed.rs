use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use transit_booking_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        bus_routes::{ActiveModel as RouteActive, Entity as BusRoutes},
        schedules::{ActiveModel as ScheduleActive, Entity as Schedules},
        users::{ActiveModel as UserActive, Entity as Users, UserRole},
    },
    services::auth_service::hash_password,
};

const SAMPLE_ROUTES: [(&str, &str, Option<&str>, f64, &str); 3] = [
    ("Colombo", "Kandy", Some("Kadawatha, Kegalle"), 115.0, "3h 30m"),
    ("Colombo", "Galle", Some("Panadura, Kalutara"), 126.0, "2h 45m"),
    ("Kandy", "Nuwara Eliya", None, 77.5, "2h 50m"),
];

const SAMPLE_SCHEDULES: [(usize, &str, &str, &str, &str); 4] = [
    (0, "Colombo - Kandy", "06:00", "09:30", "Daily"),
    (0, "Colombo - Kandy", "14:00", "17:30", "Daily"),
    (1, "Colombo - Galle", "07:15", "10:00", "Weekdays"),
    (2, "Kandy - Nuwara Eliya", "08:00", "10:50", "Weekends"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let admin_id = ensure_user(
        &orm,
        &config.admin_username,
        "admin@example.com",
        &config.admin_password,
        UserRole::Admin,
    )
    .await?;
    let user_id = ensure_user(&orm, "traveller", "traveller@example.com", "user123", UserRole::User)
        .await?;
    seed_routes_and_schedules(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    username: &str,
    email: &str,
    password: &str,
    role: UserRole,
) -> anyhow::Result<i64> {
    if let Some(existing) = Users::find_by_username(username).one(orm).await? {
        return Ok(existing.id);
    }

    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let user = UserActive {
        id: NotSet,
        username: Set(username.to_string()),
        password_hash: Set(password_hash),
        email: Set(email.to_string()),
        phone_number: Set(None),
        role: Set(role),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;
    Ok(user.id)
}

async fn seed_routes_and_schedules(orm: &DatabaseConnection) -> anyhow::Result<()> {
    if BusRoutes::find().count(orm).await? > 0 {
        println!("Routes already present, skipping route and schedule seed");
        return Ok(());
    }

    let mut route_ids = Vec::with_capacity(SAMPLE_ROUTES.len());
    for (start, end, stops, distance, travel_time) in SAMPLE_ROUTES {
        let route = RouteActive {
            id: NotSet,
            start_point: Set(start.to_string()),
            end_point: Set(end.to_string()),
            intermediate_stops: Set(stops.map(str::to_string)),
            distance: Set(distance),
            estimated_travel_time: Set(travel_time.to_string()),
        }
        .insert(orm)
        .await?;
        route_ids.push(route.id);
    }

    if Schedules::find().count(orm).await? > 0 {
        return Ok(());
    }
    for (route_index, route_name, departure, arrival, frequency) in SAMPLE_SCHEDULES {
        ScheduleActive {
            id: NotSet,
            route_id: Set(route_ids.get(route_index).copied()),
            route_name: Set(route_name.to_string()),
            departure_time: Set(departure.to_string()),
            arrival_time: Set(arrival.to_string()),
            frequency: Set(frequency.to_string()),
            available_seats: Set(Some(50)),
        }
        .insert(orm)
        .await?;
    }

    Ok(())
}
