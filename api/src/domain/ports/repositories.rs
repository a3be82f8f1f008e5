//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the in-memory store).

use async_trait::async_trait;

use crate::domain::entities::{
    Complex, ComplexId, NewComplex, NewUnit, Reservation, ReservationId, Unit, UnitId,
};
use crate::error::DomainError;

/// Repository for Reservation entities
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// List every reservation, in any status
    async fn list_all(&self) -> Result<Vec<Reservation>, DomainError>;

    /// Find a reservation by ID
    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError>;

    /// Find every reservation of a unit, in any status
    async fn find_by_unit(&self, unit_id: &UnitId) -> Result<Vec<Reservation>, DomainError>;

    /// Store a new reservation.
    ///
    /// Fails with `DomainError::Conflict` when an active reservation of the
    /// same unit already overlaps the stay.
    async fn add(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Overwrite an existing reservation
    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError>;
}

/// Repository for Unit entities
#[async_trait]
pub trait UnitRepository: Send + Sync {
    /// Find a unit by ID, with its rate windows attached in stored order
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<Unit>, DomainError>;

    /// List all units
    async fn list(&self) -> Result<Vec<Unit>, DomainError>;

    /// List the units of one complex
    async fn list_by_complex(&self, complex_id: &ComplexId) -> Result<Vec<Unit>, DomainError>;

    /// Create a new unit
    async fn create(&self, unit: &NewUnit) -> Result<Unit, DomainError>;

    /// Overwrite a unit, including its flags and rate windows
    async fn update(&self, unit: &Unit) -> Result<(), DomainError>;

    /// Write only the cached availability flag
    async fn set_available(&self, id: &UnitId, is_available: bool) -> Result<(), DomainError>;

    /// Remove a unit and its rate windows
    async fn delete(&self, id: &UnitId) -> Result<(), DomainError>;
}

/// Repository for Complex entities
#[async_trait]
pub trait ComplexRepository: Send + Sync {
    async fn find_by_id(&self, id: &ComplexId) -> Result<Option<Complex>, DomainError>;

    /// List all complexes, ordered by name
    async fn list(&self) -> Result<Vec<Complex>, DomainError>;

    async fn create(&self, complex: &NewComplex) -> Result<Complex, DomainError>;

    async fn update(&self, complex: &Complex) -> Result<(), DomainError>;

    async fn delete(&self, id: &ComplexId) -> Result<(), DomainError>;
}
