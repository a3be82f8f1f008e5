//! Unit service
//!
//! Administration of complexes, units and their rate windows.
//!
//! Rate windows that share a weekday are allowed, since resolution is
//! first-match in stored order, but they are reported as a data-quality
//! finding so an administrator can fix them.
//!
//! Every write to an existing unit runs under the same per-unit lock the
//! reservation lifecycle uses.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::availability_service::AvailabilityService;
use super::unit_locks::UnitLocks;
use crate::domain::entities::{
    first_occurrence_on_or_after, overlapping_windows, Complex, ComplexId, NewComplex,
    NewRateWindow, NewUnit, RateWindowId, Unit, UnitChanges, UnitId,
};
use crate::domain::ports::{ComplexRepository, ReservationRepository, UnitRepository};
use crate::error::DomainError;

const MAX_NAME_CHARS: usize = 200;

/// Two windows of one unit that cover a common weekday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateOverlap {
    pub first: RateWindowId,
    pub second: RateWindowId,
}

/// A unit after its rate windows were replaced
#[derive(Debug)]
pub struct RateUpdateResult {
    pub unit: Unit,
    pub overlaps: Vec<RateOverlap>,
}

/// A stay aligned to one of the unit's rate windows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedStay {
    pub rate_window_id: RateWindowId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

/// Service for managing complexes and units
pub struct UnitService<UR, CR, RR>
where
    UR: UnitRepository,
    CR: ComplexRepository,
    RR: ReservationRepository,
{
    units: Arc<UR>,
    complexes: Arc<CR>,
    availability: AvailabilityService<RR>,
    locks: Arc<UnitLocks>,
}

impl<UR, CR, RR> UnitService<UR, CR, RR>
where
    UR: UnitRepository,
    CR: ComplexRepository,
    RR: ReservationRepository,
{
    /// `locks` must be the ones the reservation lifecycle uses
    pub fn new(
        units: Arc<UR>,
        complexes: Arc<CR>,
        reservations: Arc<RR>,
        locks: Arc<UnitLocks>,
    ) -> Self {
        Self {
            units,
            complexes,
            availability: AvailabilityService::new(reservations),
            locks,
        }
    }

    // ------------------------------------------------------------------------
    // Complexes
    // ------------------------------------------------------------------------

    pub async fn create_complex(&self, new_complex: &NewComplex) -> Result<Complex, DomainError> {
        check_name("Name", &new_complex.name)?;

        let complex = self.complexes.create(new_complex).await?;
        tracing::info!(complex_id = %complex.id, name = %complex.name, "Complex created");
        Ok(complex)
    }

    pub async fn get_complex(&self, id: &ComplexId) -> Result<Option<Complex>, DomainError> {
        self.complexes.find_by_id(id).await
    }

    pub async fn list_complexes(&self) -> Result<Vec<Complex>, DomainError> {
        self.complexes.list().await
    }

    /// Rename or move a complex
    pub async fn update_complex(
        &self,
        id: &ComplexId,
        changes: &NewComplex,
    ) -> Result<Complex, DomainError> {
        check_name("Name", &changes.name)?;

        let mut complex = self.load_complex(id).await?;
        complex.name = changes.name.trim().to_string();
        complex.address = changes.address.trim().to_string();
        self.complexes.update(&complex).await?;

        tracing::info!(complex_id = %id, name = %complex.name, "Complex updated");
        Ok(complex)
    }

    /// Delete a complex that no longer has units
    pub async fn delete_complex(&self, id: &ComplexId) -> Result<(), DomainError> {
        self.load_complex(id).await?;

        let attached = self.units.list_by_complex(id).await?;
        if !attached.is_empty() {
            tracing::warn!(complex_id = %id, units = attached.len(), "Refusing to delete complex");
            return Err(DomainError::Conflict(
                "Cannot delete complex because it has associated units".to_string(),
            ));
        }

        self.complexes.delete(id).await?;
        tracing::info!(complex_id = %id, "Complex deleted");
        Ok(())
    }

    /// Units of one complex
    pub async fn list_complex_units(&self, id: &ComplexId) -> Result<Vec<Unit>, DomainError> {
        self.load_complex(id).await?;
        self.units.list_by_complex(id).await
    }

    // ------------------------------------------------------------------------
    // Units
    // ------------------------------------------------------------------------

    /// Create a unit with its initial rate windows
    pub async fn create_unit(&self, new_unit: &NewUnit) -> Result<Unit, DomainError> {
        check_name("Title", &new_unit.title)?;
        check_size(new_unit.capacity, new_unit.bedroom_count)?;
        if let Some(complex_id) = &new_unit.complex_id {
            self.require_complex(complex_id).await?;
        }

        let unit = self.units.create(new_unit).await?;
        report_overlaps(&unit);

        tracing::info!(
            unit_id = %unit.id,
            title = %unit.title,
            rate_windows = unit.rate_windows.len(),
            "Unit created"
        );
        Ok(unit)
    }

    /// Find a unit by ID
    pub async fn get_unit(&self, id: &UnitId) -> Result<Option<Unit>, DomainError> {
        self.units.find_by_id(id).await
    }

    /// List all units
    pub async fn list_units(&self) -> Result<Vec<Unit>, DomainError> {
        self.units.list().await
    }

    /// Change a unit's attributes; rate windows and the cached flag are kept
    pub async fn update_unit(&self, id: &UnitId, changes: UnitChanges) -> Result<Unit, DomainError> {
        if let Some(title) = &changes.title {
            check_name("Title", title)?;
        }
        if let Some(complex_id) = &changes.complex_id {
            self.require_complex(complex_id).await?;
        }

        let _guard = self.locks.acquire(*id).await;
        let mut unit = self.load_unit(id).await?;
        changes.apply_to(&mut unit);
        check_size(unit.capacity, unit.bedroom_count)?;
        self.units.update(&unit).await?;

        tracing::info!(unit_id = %id, title = %unit.title, "Unit updated");
        Ok(unit)
    }

    /// Delete a unit that has no pending or confirmed reservation
    pub async fn delete_unit(&self, id: &UnitId) -> Result<(), DomainError> {
        let _guard = self.locks.acquire(*id).await;
        self.load_unit(id).await?;

        if self.availability.has_active_reservations(id).await? {
            tracing::warn!(unit_id = %id, "Refusing to delete unit with active reservations");
            return Err(DomainError::Conflict(
                "Cannot delete unit because it has active reservations".to_string(),
            ));
        }

        self.units.delete(id).await?;
        tracing::info!(unit_id = %id, "Unit deleted");
        Ok(())
    }

    /// Replace every rate window of a unit, keeping the given order
    pub async fn replace_rate_windows(
        &self,
        id: &UnitId,
        windows: Vec<NewRateWindow>,
    ) -> Result<RateUpdateResult, DomainError> {
        let _guard = self.locks.acquire(*id).await;
        let mut unit = self.load_unit(id).await?;

        unit.rate_windows = windows
            .into_iter()
            .map(|w| w.into_window(unit.id))
            .collect::<Result<Vec<_>, _>>()?;
        self.units.update(&unit).await?;

        let overlaps = report_overlaps(&unit);
        tracing::info!(
            unit_id = %unit.id,
            rate_windows = unit.rate_windows.len(),
            overlaps = overlaps.len(),
            "Rate windows replaced"
        );
        Ok(RateUpdateResult { unit, overlaps })
    }

    /// Earliest stay on or after `from` that starts on a window's start day
    /// and ends on its end day
    pub async fn suggest_aligned_stay(
        &self,
        id: &UnitId,
        from: NaiveDate,
    ) -> Result<Option<AlignedStay>, DomainError> {
        let unit = self.load_unit(id).await?;
        Ok(aligned_stay(&unit, from))
    }

    async fn load_unit(&self, id: &UnitId) -> Result<Unit, DomainError> {
        self.units
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Unit {} not found", id)))
    }

    async fn load_complex(&self, id: &ComplexId) -> Result<Complex, DomainError> {
        self.complexes
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Complex {} not found", id)))
    }

    /// A unit may only point at a complex that exists
    async fn require_complex(&self, id: &ComplexId) -> Result<(), DomainError> {
        match self.complexes.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::Validation(format!("Complex {} does not exist", id))),
        }
    }
}

/// Candidate per window in stored order; the earliest check-in wins
pub fn aligned_stay(unit: &Unit, from: NaiveDate) -> Option<AlignedStay> {
    unit.rate_windows
        .iter()
        .filter_map(|window| {
            let check_in = first_occurrence_on_or_after(window.start_day, from);
            // Check-out lands on the end day, a week later for single-day windows
            let nights = match window.span_len() - 1 {
                0 => 7,
                n => n,
            };
            let check_out = check_in.checked_add_days(Days::new(u64::from(nights)))?;
            Some(AlignedStay {
                rate_window_id: window.id,
                check_in,
                check_out,
            })
        })
        .min_by_key(|stay| stay.check_in)
}

fn check_name(field: &str, value: &str) -> Result<(), DomainError> {
    let len = value.trim().chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(DomainError::Validation(format!(
            "{} must be between 1 and {} characters",
            field, MAX_NAME_CHARS
        )));
    }
    Ok(())
}

fn check_size(capacity: i32, bedroom_count: i32) -> Result<(), DomainError> {
    if capacity < 1 || bedroom_count < 0 {
        return Err(DomainError::Validation(
            "Capacity must be at least 1 and bedroom count not negative".to_string(),
        ));
    }
    Ok(())
}

fn report_overlaps(unit: &Unit) -> Vec<RateOverlap> {
    let overlaps: Vec<RateOverlap> = overlapping_windows(&unit.rate_windows)
        .into_iter()
        .map(|(first, second)| RateOverlap { first, second })
        .collect();

    for overlap in &overlaps {
        tracing::warn!(
            unit_id = %unit.id,
            first = %overlap.first,
            second = %overlap.second,
            "Rate windows share a weekday; the first one wins"
        );
    }
    overlaps
}
