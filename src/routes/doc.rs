use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        CountData,
        auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse},
        bus_routes::{RouteList, RouteRequest},
        schedules::{ScheduleList, ScheduleRequest},
        tickets::{
            AvailableSeats, BookTicketRequest, BulkStatusUpdateRequest, TicketHistory, TicketList,
            TicketStatistics, TicketStatusUpdateRequest,
        },
        users::{UserList, UserRequest, UserStatistics},
    },
    entity::{tickets::TicketStatus, users::UserRole},
    models::{Route, Schedule, Ticket, TicketStatusChange, User},
    response::{ApiResponse, Meta},
    routes::{auth, bus_routes, health, params, schedules, tickets, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::register,
        auth::login,
        auth::users,
        bus_routes::list_routes,
        bus_routes::list_routes_admin,
        bus_routes::count_routes,
        bus_routes::get_route,
        bus_routes::create_route,
        bus_routes::update_route,
        bus_routes::delete_route,
        schedules::list_schedules,
        schedules::count_schedules,
        schedules::list_schedules_by_route,
        schedules::get_schedule,
        schedules::create_schedule,
        schedules::update_schedule,
        schedules::assign_route,
        schedules::delete_schedule,
        tickets::book_ticket,
        tickets::list_tickets,
        tickets::list_user_tickets,
        tickets::get_ticket,
        tickets::cancel_ticket,
        tickets::update_status,
        tickets::bulk_update_status,
        tickets::ticket_statistics,
        tickets::count_tickets,
        tickets::ticket_history,
        tickets::available_seats,
        tickets::delete_ticket,
        users::register,
        users::login,
        users::list_users,
        users::user_statistics,
        users::count_users,
        users::get_user,
        users::create_user,
        users::update_user,
        users::delete_user
    ),
    components(
        schemas(
            Route,
            Schedule,
            Ticket,
            TicketStatusChange,
            TicketStatus,
            User,
            UserRole,
            RouteRequest,
            RouteList,
            ScheduleRequest,
            ScheduleList,
            BookTicketRequest,
            TicketStatusUpdateRequest,
            BulkStatusUpdateRequest,
            TicketList,
            TicketHistory,
            TicketStatistics,
            AvailableSeats,
            UserRequest,
            UserList,
            UserStatistics,
            RegisterRequest,
            RegisterResponse,
            LoginRequest,
            LoginResponse,
            CountData,
            params::TicketQuery,
            params::SeatQuery,
            health::HealthData,
            Meta,
            ApiResponse<Route>,
            ApiResponse<RouteList>,
            ApiResponse<Schedule>,
            ApiResponse<ScheduleList>,
            ApiResponse<Ticket>,
            ApiResponse<TicketList>,
            ApiResponse<User>,
            ApiResponse<UserList>,
            ApiResponse<LoginResponse>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Routes", description = "Route endpoints"),
        (name = "Schedules", description = "Schedule endpoints"),
        (name = "Tickets", description = "Ticket booking and status endpoints"),
        (name = "Users", description = "User management endpoints"),
        (name = "Auth", description = "Authentication endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
