//! Application layer
//!
//! Contains use cases and service orchestration.
//! Services coordinate between domain entities and ports.

pub mod availability_service;
pub mod pricing_service;
pub mod reservation_service;
pub mod stay_validator;
pub mod unit_locks;
pub mod unit_service;

pub use reservation_service::ReservationService;
pub use stay_validator::{StayRejection, ValidationOutcome};
pub use unit_locks::UnitLocks;
pub use unit_service::{AlignedStay, RateOverlap, UnitService};
