//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Dates in tests are anchored on `today()`, Saturday 2030-06-01.

use chrono::{NaiveDate, Utc, Weekday};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::entities::{
    Complex, ComplexId, RateWindow, RateWindowId, Reservation, ReservationId, ReservationStatus,
    Unit, UnitId, UserId,
};

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// The date `FixedClock::default()` reports
pub fn today() -> NaiveDate {
    date(2030, 6, 1)
}

/// A complex with no units
pub fn test_complex() -> Complex {
    Complex {
        id: ComplexId::new(),
        name: "Test Residences".to_string(),
        address: "1 Harbour Road".to_string(),
        created_at: Utc::now(),
    }
}

/// A flexible unit with one weekend window, Friday through Sunday at 100
pub fn test_unit() -> Unit {
    test_unit_with_rates(&[(Weekday::Fri, Weekday::Sun, 100)], false)
}

/// A unit with the given `(start_day, end_day, price)` windows, in order
pub fn test_unit_with_rates(rates: &[(Weekday, Weekday, i64)], mandatory: bool) -> Unit {
    let id = UnitId::new();
    Unit {
        id,
        complex_id: None,
        title: "Test Cottage".to_string(),
        description: Some("A unit for tests".to_string()),
        capacity: 4,
        bedroom_count: 2,
        mandatory_check_in_out: mandatory,
        is_available: true,
        rate_windows: rates
            .iter()
            .map(|&(start_day, end_day, price)| RateWindow {
                id: RateWindowId::new(),
                unit_id: id,
                start_day,
                end_day,
                price_per_night: Decimal::new(price, 0),
            })
            .collect(),
        created_at: Utc::now(),
    }
}

/// A reservation on `unit_id` with a fresh user and a zero total
pub fn test_reservation(
    unit_id: UnitId,
    check_in: NaiveDate,
    check_out: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id: ReservationId::new(),
        unit_id,
        user_id: UserId(Uuid::new_v4()),
        check_in,
        check_out,
        status,
        total_price: Decimal::ZERO,
        created_at: Utc::now(),
    }
}
