//! In-memory adapter for ReservationRepository

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::entities::{Reservation, ReservationId, UnitId};
use crate::domain::ports::ReservationRepository;
use crate::error::DomainError;

/// In-memory implementation of ReservationRepository
///
/// `add` checks for overlapping active reservations under the write lock, so
/// the check and the insert are atomic.
#[derive(Default, Clone)]
pub struct InMemoryReservationRepository {
    reservations: Arc<RwLock<HashMap<ReservationId, Reservation>>>,
}

impl InMemoryReservationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate with a reservation, bypassing the overlap check
    #[cfg(test)]
    pub fn with_reservation(self, reservation: Reservation) -> Self {
        self.reservations.write().insert(reservation.id, reservation);
        self
    }
}

#[async_trait]
impl ReservationRepository for InMemoryReservationRepository {
    async fn list_all(&self) -> Result<Vec<Reservation>, DomainError> {
        Ok(self.reservations.read().values().cloned().collect())
    }

    async fn find_by_id(&self, id: &ReservationId) -> Result<Option<Reservation>, DomainError> {
        Ok(self.reservations.read().get(id).cloned())
    }

    async fn find_by_unit(&self, unit_id: &UnitId) -> Result<Vec<Reservation>, DomainError> {
        Ok(self
            .reservations
            .read()
            .values()
            .filter(|r| r.unit_id == *unit_id)
            .cloned()
            .collect())
    }

    async fn add(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write();

        if reservations.contains_key(&reservation.id) {
            return Err(DomainError::Conflict(format!(
                "Reservation {} already exists",
                reservation.id
            )));
        }

        if reservation.is_active() {
            if let Some(existing) = reservations.values().find(|r| {
                r.conflicts_with(reservation.unit_id, reservation.check_in, reservation.check_out)
            }) {
                return Err(DomainError::Conflict(format!(
                    "Stay overlaps reservation {} on unit {}",
                    existing.id, reservation.unit_id
                )));
            }
        }

        reservations.insert(reservation.id, reservation.clone());
        Ok(())
    }

    async fn update(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut reservations = self.reservations.write();
        match reservations.get_mut(&reservation.id) {
            Some(stored) => {
                *stored = reservation.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "Reservation {} not found",
                reservation.id
            ))),
        }
    }
}
