pub mod bus_routes;
pub mod schedules;
pub mod ticket_status_history;
pub mod tickets;
pub mod users;

pub use bus_routes::Entity as BusRoutes;
pub use schedules::Entity as Schedules;
pub use ticket_status_history::Entity as TicketStatusHistory;
pub use tickets::Entity as Tickets;
pub use users::Entity as Users;
