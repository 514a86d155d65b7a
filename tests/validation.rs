use chrono::NaiveDate;
use transit_booking_api::{
    config::{ServiceKind, parse_services},
    entity::{tickets::TicketStatus, users::UserRole},
    error::AppError,
    validation::{
        SEAT_CAPACITY, available_seats, optional_text, parse_clock_time, parse_travel_date_time,
        require_text, validate_seat_number,
    },
};

fn bad_request_message(err: AppError) -> String {
    match err {
        AppError::BadRequest(msg) => msg,
        other => panic!("expected BadRequest, got {other:?}"),
    }
}

#[test]
fn require_text_trims_and_rejects_blank() {
    assert_eq!(require_text(Some("  Colombo "), "x").unwrap(), "Colombo");
    let err = require_text(Some("   "), "Start point is required").unwrap_err();
    assert_eq!(bad_request_message(err), "Start point is required");
    assert!(require_text(None, "missing").is_err());
}

#[test]
fn optional_text_maps_blank_to_none() {
    assert_eq!(optional_text(Some("  ".into())), None);
    assert_eq!(optional_text(Some(" a ".into())), Some("a".into()));
    assert_eq!(optional_text(None), None);
}

#[test]
fn travel_date_time_accepts_iso_with_and_without_seconds() {
    let expected = NaiveDate::from_ymd_opt(2025, 3, 14)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    assert_eq!(parse_travel_date_time("2025-03-14T08:30").unwrap(), expected);
    assert_eq!(parse_travel_date_time("2025-03-14T08:30:00").unwrap(), expected);
    assert_eq!(parse_travel_date_time("2025-03-14 08:30:00.000").unwrap(), expected);
    assert!(parse_travel_date_time("14/03/2025 08:30").is_err());
    assert!(parse_travel_date_time("2025-03-14").is_err());
}

#[test]
fn clock_time_requires_hh_mm() {
    assert_eq!(parse_clock_time(Some("06:45"), "Departure time").unwrap(), "06:45");
    assert_eq!(parse_clock_time(Some("23:59:59"), "Arrival time").unwrap(), "23:59:59");

    let err = parse_clock_time(Some("6 pm"), "Departure time").unwrap_err();
    assert_eq!(bad_request_message(err), "Departure time must be formatted as HH:MM");
    let err = parse_clock_time(None, "Arrival time").unwrap_err();
    assert_eq!(bad_request_message(err), "Arrival time is required");
}

#[test]
fn seat_numbers_are_bounded_by_capacity() {
    assert!(validate_seat_number(1).is_ok());
    assert!(validate_seat_number(SEAT_CAPACITY).is_ok());
    assert!(validate_seat_number(0).is_err());
    assert!(validate_seat_number(SEAT_CAPACITY + 1).is_err());
}

#[test]
fn available_seats_excludes_booked_and_stays_sorted() {
    let free = available_seats(&[3, 1, 50]);
    assert_eq!(free.len(), 47);
    assert_eq!(free.first(), Some(&2));
    assert_eq!(free.last(), Some(&49));
    assert!(!free.contains(&3));
    assert!(free.windows(2).all(|w| w[0] < w[1]));

    assert_eq!(available_seats(&[]).len(), SEAT_CAPACITY as usize);
}

#[test]
fn ticket_status_parses_case_insensitively() {
    assert_eq!("pending".parse::<TicketStatus>().unwrap(), TicketStatus::Pending);
    assert_eq!(" CONFIRMED ".parse::<TicketStatus>().unwrap(), TicketStatus::Confirmed);
    assert_eq!("Cancelled".parse::<TicketStatus>().unwrap(), TicketStatus::Canceled);
    assert!("REFUNDED".parse::<TicketStatus>().is_err());
    assert_eq!(TicketStatus::Canceled.to_string(), "CANCELED");
}

#[test]
fn user_role_parses_known_roles_only() {
    assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
    assert_eq!("USER".parse::<UserRole>().unwrap(), UserRole::User);
    assert!("root".parse::<UserRole>().is_err());
}

#[test]
fn enabled_services_parse_and_dedupe() {
    let services = parse_services("tickets, routes,tickets").unwrap();
    assert_eq!(services, vec![ServiceKind::Tickets, ServiceKind::Routes]);
    assert!(parse_services("tickets,payments").is_err());
}
