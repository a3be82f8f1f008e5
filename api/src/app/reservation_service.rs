//! Reservation service
//!
//! Owns the reservation lifecycle:
//!
//! ```text
//! Pending --confirm--> Confirmed
//! Pending | Confirmed --cancel--> Cancelled
//! ```
//!
//! Every transition runs under the unit's lock so the overlap check and the
//! write that depends on it cannot interleave with another request on the
//! same unit. The reservation store enforces the same overlap rule on `add`.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use super::availability_service::AvailabilityService;
use super::pricing_service::PricingService;
use super::stay_validator::{StayValidator, ValidationOutcome};
use super::unit_locks::{UnitGuard, UnitLocks};
use crate::domain::entities::{
    NewReservation, Reservation, ReservationId, ReservationStatus, UnitId, UserId,
};
use crate::domain::ports::{Clock, ReservationRepository, UnitRepository};
use crate::error::{BookingError, DomainError};

/// Service for creating, confirming and cancelling reservations
pub struct ReservationService<UR, RR, C>
where
    UR: UnitRepository,
    RR: ReservationRepository,
    C: Clock + ?Sized,
{
    units: Arc<UR>,
    reservations: Arc<RR>,
    availability: Arc<AvailabilityService<RR>>,
    validator: StayValidator<UR, RR, C>,
    pricing: PricingService<UR>,
    locks: Arc<UnitLocks>,
}

impl<UR, RR, C> ReservationService<UR, RR, C>
where
    UR: UnitRepository,
    RR: ReservationRepository,
    C: Clock + ?Sized,
{
    /// `locks` must be shared with every other service that writes units
    pub fn new(
        units: Arc<UR>,
        reservations: Arc<RR>,
        clock: Arc<C>,
        locks: Arc<UnitLocks>,
    ) -> Self {
        let availability = Arc::new(AvailabilityService::new(reservations.clone()));
        Self {
            validator: StayValidator::new(units.clone(), availability.clone(), clock),
            pricing: PricingService::new(units.clone()),
            units,
            reservations,
            availability,
            locks,
        }
    }

    pub fn validator(&self) -> &StayValidator<UR, RR, C> {
        &self.validator
    }

    pub fn pricing(&self) -> &PricingService<UR> {
        &self.pricing
    }

    pub fn availability(&self) -> &AvailabilityService<RR> {
        &self.availability
    }

    /// Create a pending reservation for `unit_id`
    ///
    /// The stay is validated, rechecked for overlap, priced and stored. Nothing
    /// is written if any step fails.
    pub async fn create(
        &self,
        request: NewReservation,
        unit_id: UnitId,
    ) -> Result<Reservation, BookingError> {
        let mut reservation = Reservation {
            id: ReservationId::new(),
            unit_id,
            user_id: request.user_id,
            check_in: request.check_in,
            check_out: request.check_out,
            status: ReservationStatus::Pending,
            total_price: Decimal::ZERO,
            created_at: Utc::now(),
        };

        // Reject before touching the lock map, so unknown units leave no entry
        self.check_stay(&reservation).await?;

        let _guard = self.locks.acquire(unit_id).await;

        // Rates and bookings may have changed while waiting for the lock
        self.check_stay(&reservation).await?;

        // The validator already checked overlap; check again right before the write
        let overlapping = self
            .availability
            .conflicts(&unit_id, reservation.check_in, reservation.check_out)
            .await?;
        if !overlapping.is_empty() {
            let ids: Vec<String> = overlapping.iter().map(|r| r.id.to_string()).collect();
            tracing::warn!(unit_id = %unit_id, overlapping = %ids.join(", "), "Overlap found on recheck");
            return Err(BookingError::Overlap);
        }

        reservation.total_price = self
            .pricing
            .calculate_total(&unit_id, reservation.check_in, reservation.check_out)
            .await?;

        self.reservations
            .add(&reservation)
            .await
            .map_err(|e| match e {
                DomainError::Conflict(_) => BookingError::Overlap,
                e => BookingError::Domain(e),
            })?;

        tracing::info!(
            reservation_id = %reservation.id,
            unit_id = %unit_id,
            user_id = %reservation.user_id,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            total_price = %reservation.total_price,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Confirm a pending reservation
    pub async fn confirm(&self, id: &ReservationId, actor: &UserId) -> Result<Reservation, BookingError> {
        let (_guard, mut reservation) = self.load_locked(id).await?;

        if !reservation.can_be_confirmed() {
            tracing::debug!(reservation_id = %id, status = %reservation.status, "Refusing to confirm");
            return Err(BookingError::InvalidState(
                "Only pending reservations can be confirmed".to_string(),
            ));
        }

        reservation.status = ReservationStatus::Confirmed;
        self.reservations.update(&reservation).await?;

        tracing::info!(reservation_id = %id, actor = %actor, "Reservation confirmed");
        Ok(reservation)
    }

    /// Cancel a reservation and refresh the unit's cached availability flag
    ///
    /// Cancelling an already cancelled reservation succeeds and changes nothing
    /// but the cached flag.
    pub async fn cancel(&self, id: &ReservationId, actor: &UserId) -> Result<Reservation, BookingError> {
        let (_guard, mut reservation) = self.load_locked(id).await?;
        let unit_id = reservation.unit_id;

        reservation.status = ReservationStatus::Cancelled;
        self.reservations.update(&reservation).await?;

        self.refresh_unit_flag(&unit_id).await?;

        tracing::info!(reservation_id = %id, unit_id = %unit_id, actor = %actor, "Reservation cancelled");
        Ok(reservation)
    }

    /// Find a reservation by ID
    pub async fn get(&self, id: &ReservationId) -> Result<Option<Reservation>, BookingError> {
        Ok(self.reservations.find_by_id(id).await?)
    }

    /// List every reservation, optionally filtered by status
    pub async fn list(&self, status: Option<ReservationStatus>) -> Result<Vec<Reservation>, BookingError> {
        let mut reservations = self.reservations.list_all().await?;
        if let Some(status) = status {
            reservations.retain(|r| r.status == status);
        }
        reservations.sort_by_key(|r| (r.check_in, r.created_at));
        Ok(reservations)
    }

    /// List the reservations of one unit
    pub async fn list_for_unit(&self, unit_id: &UnitId) -> Result<Vec<Reservation>, BookingError> {
        let mut reservations = self.reservations.find_by_unit(unit_id).await?;
        reservations.sort_by_key(|r| (r.check_in, r.created_at));
        Ok(reservations)
    }

    async fn check_stay(&self, reservation: &Reservation) -> Result<(), BookingError> {
        let outcome = self
            .validator
            .validate(&reservation.unit_id, reservation.check_in, reservation.check_out)
            .await?;

        if let ValidationOutcome::Rejected(reason) = outcome {
            tracing::warn!(
                unit_id = %reservation.unit_id,
                user_id = %reservation.user_id,
                code = reason.code(),
                %reason,
                "Reservation rejected"
            );
            return Err(BookingError::ValidationFailed(reason));
        }
        Ok(())
    }

    /// Load a reservation while holding its unit's lock
    async fn load_locked(
        &self,
        id: &ReservationId,
    ) -> Result<(UnitGuard, Reservation), BookingError> {
        let unit_id = self.load(id).await?.unit_id;
        let guard = self.locks.acquire(unit_id).await;

        // Reload under the lock; the status may have changed while waiting
        let reservation = self.load(id).await?;
        Ok((guard, reservation))
    }

    async fn load(&self, id: &ReservationId) -> Result<Reservation, BookingError> {
        self.reservations
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Reservation with ID {} not found", id)))
    }

    /// The cached flag is true iff no active reservation remains on the unit
    async fn refresh_unit_flag(&self, unit_id: &UnitId) -> Result<(), BookingError> {
        let is_available = !self.availability.has_active_reservations(unit_id).await?;

        match self.units.set_available(unit_id, is_available).await {
            Ok(()) => {
                tracing::debug!(unit_id = %unit_id, is_available, "Refreshed unit availability flag");
                Ok(())
            }
            Err(DomainError::NotFound(_)) => {
                tracing::warn!(unit_id = %unit_id, "Unit of cancelled reservation no longer exists");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
