//! Availability service
//!
//! Answers "is this unit free on this date / for this stay" from the
//! reservation store. This is the authoritative availability view; the unit's
//! cached `is_available` flag is not consulted.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::entities::{Reservation, UnitId};
use crate::domain::ports::ReservationRepository;
use crate::error::DomainError;

/// Service for availability queries
pub struct AvailabilityService<RR>
where
    RR: ReservationRepository,
{
    reservations: Arc<RR>,
}

impl<RR> AvailabilityService<RR>
where
    RR: ReservationRepository,
{
    pub fn new(reservations: Arc<RR>) -> Self {
        Self { reservations }
    }

    /// A unit is unavailable on `date` if an active reservation occupies that night
    pub async fn is_available(&self, unit_id: &UnitId, date: NaiveDate) -> Result<bool, DomainError> {
        let reservations = self.reservations.find_by_unit(unit_id).await?;
        let available = !reservations
            .iter()
            .any(|r| r.unit_id == *unit_id && r.is_active() && r.occupies(date));

        tracing::debug!(unit_id = %unit_id, %date, available, "Checked availability");
        Ok(available)
    }

    /// Every night in `[check_in, check_out)` must be free
    pub async fn is_range_available(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, DomainError> {
        let reservations = self.reservations.find_by_unit(unit_id).await?;
        let available = check_in
            .iter_days()
            .take_while(|d| *d < check_out)
            .all(|d| {
                !reservations
                    .iter()
                    .any(|r| r.unit_id == *unit_id && r.is_active() && r.occupies(d))
            });
        Ok(available)
    }

    /// Active reservations of the unit overlapping `[check_in, check_out)`
    pub async fn conflicts(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Reservation>, DomainError> {
        let reservations = self.reservations.find_by_unit(unit_id).await?;
        Ok(reservations
            .into_iter()
            .filter(|r| r.conflicts_with(*unit_id, check_in, check_out))
            .collect())
    }

    /// Whether any active reservation remains on the unit, regardless of dates
    pub async fn has_active_reservations(&self, unit_id: &UnitId) -> Result<bool, DomainError> {
        let reservations = self.reservations.find_by_unit(unit_id).await?;
        Ok(reservations.iter().any(|r| r.is_active()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryReservationRepository;
    use crate::domain::entities::ReservationStatus;
    use crate::test_utils::{date, test_reservation};

    fn create_service(repo: InMemoryReservationRepository) -> AvailabilityService<InMemoryReservationRepository> {
        AvailabilityService::new(Arc::new(repo))
    }

    #[tokio::test]
    async fn free_unit_is_available() {
        let service = create_service(InMemoryReservationRepository::new());
        assert!(service
            .is_available(&UnitId::new(), date(2030, 6, 12))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn booked_night_is_unavailable_but_checkout_night_is_free() {
        let unit_id = UnitId::new();
        let existing = test_reservation(
            unit_id,
            date(2030, 6, 10),
            date(2030, 6, 15),
            ReservationStatus::Confirmed,
        );
        let service = create_service(InMemoryReservationRepository::new().with_reservation(existing));

        assert!(!service.is_available(&unit_id, date(2030, 6, 10)).await.unwrap());
        assert!(!service.is_available(&unit_id, date(2030, 6, 14)).await.unwrap());
        assert!(service.is_available(&unit_id, date(2030, 6, 15)).await.unwrap());
        assert!(service.is_available(&unit_id, date(2030, 6, 9)).await.unwrap());
    }

    #[tokio::test]
    async fn cancelled_reservation_does_not_block() {
        let unit_id = UnitId::new();
        let existing = test_reservation(
            unit_id,
            date(2030, 6, 10),
            date(2030, 6, 15),
            ReservationStatus::Cancelled,
        );
        let service = create_service(InMemoryReservationRepository::new().with_reservation(existing));

        assert!(service.is_available(&unit_id, date(2030, 6, 12)).await.unwrap());
        assert!(service
            .is_range_available(&unit_id, date(2030, 6, 10), date(2030, 6, 15))
            .await
            .unwrap());
        assert!(!service.has_active_reservations(&unit_id).await.unwrap());
    }

    #[tokio::test]
    async fn other_units_do_not_block() {
        let existing = test_reservation(
            UnitId::new(),
            date(2030, 6, 10),
            date(2030, 6, 15),
            ReservationStatus::Pending,
        );
        let service = create_service(InMemoryReservationRepository::new().with_reservation(existing));

        assert!(service
            .is_available(&UnitId::new(), date(2030, 6, 12))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn range_check_matches_overlap_test() {
        let unit_id = UnitId::new();
        let existing = test_reservation(
            unit_id,
            date(2030, 6, 10),
            date(2030, 6, 15),
            ReservationStatus::Confirmed,
        );
        let service = create_service(InMemoryReservationRepository::new().with_reservation(existing));

        let cases = [
            (date(2030, 6, 14), date(2030, 6, 18), false),
            (date(2030, 6, 15), date(2030, 6, 18), true),
            (date(2030, 6, 5), date(2030, 6, 10), true),
            (date(2030, 6, 5), date(2030, 6, 11), false),
        ];
        for (check_in, check_out, expected) in cases {
            let available = service
                .is_range_available(&unit_id, check_in, check_out)
                .await
                .unwrap();
            let conflicts = service.conflicts(&unit_id, check_in, check_out).await.unwrap();
            assert_eq!(available, expected);
            assert_eq!(conflicts.is_empty(), expected);
        }
    }
}
