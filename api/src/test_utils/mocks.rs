//! Hand-written doubles for port traits

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;

use super::fixtures::today;
use crate::adapters::{InMemoryReservationRepository, InMemoryUnitRepository};
use crate::domain::entities::{ComplexId, NewUnit, Reservation, ReservationId, Unit, UnitId};
use crate::domain::ports::{Clock, ReservationRepository, UnitRepository};
use crate::error::DomainError;

// ============================================================================
// Fixed Clock
// ============================================================================

/// Clock that always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn at(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(today())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

// ============================================================================
// Stale Reservation Repository
// ============================================================================

/// Store whose reads always miss existing reservations
///
/// Simulates a read replica that lags the primary: listing returns nothing
/// while `add` still goes to the real store and its overlap constraint.
pub struct StaleReservationRepository {
    inner: InMemoryReservationRepository,
}

impl StaleReservationRepository {
    pub fn new(inner: InMemoryReservationRepository) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ReservationRepository for StaleReservationRepository {
    async fn list_all(&self) -> Result<Vec<Reservation>, DomainError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        self.inner.find_by_id(id).await
    }

    async fn find_by_unit(&self, _unit_id: &UnitId) -> Result<Vec<Reservation>, DomainError> {
        Ok(Vec::new())
    }

    async fn add(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.inner.add(reservation).await
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        self.inner.update(reservation).await
    }
}

// ============================================================================
// Slow Unit Repository
// ============================================================================

/// Unit store that pauses after every read
///
/// Widens the gap between reading a unit and writing it back, so unguarded
/// read-modify-write sequences on the same unit interleave.
pub struct SlowUnitRepository {
    inner: InMemoryUnitRepository,
    delay: Duration,
}

impl SlowUnitRepository {
    pub fn new(inner: InMemoryUnitRepository, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl UnitRepository for SlowUnitRepository {
    async fn find_by_id(&self, id: &UnitId) -> Result<Option<Unit>, DomainError> {
        let unit = self.inner.find_by_id(id).await?;
        tokio::time::sleep(self.delay).await;
        Ok(unit)
    }

    async fn list(&self) -> Result<Vec<Unit>, DomainError> {
        self.inner.list().await
    }

    async fn list_by_complex(&self, complex_id: &ComplexId) -> Result<Vec<Unit>, DomainError> {
        self.inner.list_by_complex(complex_id).await
    }

    async fn create(&self, unit: &NewUnit) -> Result<Unit, DomainError> {
        self.inner.create(unit).await
    }

    async fn update(&self, unit: &Unit) -> Result<(), DomainError> {
        self.inner.update(unit).await
    }

    async fn set_available(&self, id: &UnitId, is_available: bool) -> Result<(), DomainError> {
        self.inner.set_available(id, is_available).await
    }

    async fn delete(&self, id: &UnitId) -> Result<(), DomainError> {
        self.inner.delete(id).await
    }
}
