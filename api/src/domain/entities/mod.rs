//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod complex;
pub mod rate_window;
pub mod reservation;
pub mod unit;

pub use complex::{Complex, ComplexId, NewComplex};
pub use rate_window::{
    first_occurrence_on_or_after, overlapping_windows, resolve_rate, NewRateWindow, RateWindow,
    RateWindowId,
};
pub use reservation::{NewReservation, Reservation, ReservationId, ReservationStatus, UserId};
pub use unit::{NewUnit, Unit, UnitChanges, UnitId};
