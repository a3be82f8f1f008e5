//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod clock;
pub mod memory;

pub use clock::SystemClock;
pub use memory::{
    InMemoryComplexRepository, InMemoryReservationRepository, InMemoryUnitRepository,
};
