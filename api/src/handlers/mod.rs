//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod complexes;
pub mod reservations;
pub mod units;

pub use complexes::{
    create_complex, delete_complex, get_complex, list_complex_units, list_complexes,
    update_complex,
};
pub use reservations::{
    cancel_reservation, confirm_reservation, create_reservation, get_reservation,
    list_reservations, list_unit_reservations,
};
pub use units::{
    aligned_stay, check_availability, create_unit, delete_unit, get_unit, list_units, quote_stay,
    replace_rates, update_unit, validate_stay,
};
