//! In-memory adapters
//!
//! Process-local stores used by the server binary and by tests.

pub mod complex_repo;
pub mod reservation_repo;
pub mod unit_repo;

pub use complex_repo::InMemoryComplexRepository;
pub use reservation_repo::InMemoryReservationRepository;
pub use unit_repo::InMemoryUnitRepository;
