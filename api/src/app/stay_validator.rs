//! Stay validator
//!
//! Decides whether a stay `[check_in, check_out)` may be booked on a unit.
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. `check_in < check_out`
//! 2. `check_in` is not before today
//! 3. the unit exists
//! 4. the unit has at least one rate window
//! 5. every night of the stay resolves a rate
//! 6. mandatory check-in/out units: the stay starts on the applicable window's
//!    start day and ends on its end day
//! 7. no active reservation of the unit overlaps the stay
//!
//! A rejection is a normal outcome and is returned as a value, not an error.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use thiserror::Error;

use super::availability_service::AvailabilityService;
use crate::domain::entities::{resolve_rate, ReservationId, Unit, UnitId};
use crate::domain::ports::{Clock, ReservationRepository, UnitRepository};
use crate::error::DomainError;

/// Why a stay was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StayRejection {
    #[error("Check-in date must be before check-out date")]
    InvalidRange,

    #[error("Check-in date cannot be in the past")]
    PastDate,

    #[error("Unit not found")]
    UnitNotFound,

    #[error("No rates defined for this unit")]
    NoRates,

    #[error("No valid rate found for the night of {0}")]
    UncoveredNight(NaiveDate),

    #[error(
        "Stays must check in on {expected_check_in} and check out on {expected_check_out} \
         (requested {check_in} to {check_out})"
    )]
    MisalignedCheckInOut {
        check_in: Weekday,
        check_out: Weekday,
        expected_check_in: Weekday,
        expected_check_out: Weekday,
    },

    #[error("Dates conflict with existing reservation {0}")]
    Overlap(ReservationId),
}

impl StayRejection {
    /// Stable machine-readable reason code
    pub fn code(&self) -> &'static str {
        match self {
            StayRejection::InvalidRange => "invalid_range",
            StayRejection::PastDate => "past_date",
            StayRejection::UnitNotFound => "unit_not_found",
            StayRejection::NoRates => "no_rates",
            StayRejection::UncoveredNight(_) => "uncovered_night",
            StayRejection::MisalignedCheckInOut { .. } => "misaligned_check_in_out",
            StayRejection::Overlap(_) => "overlap",
        }
    }
}

/// Result of validating a stay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted,
    Rejected(StayRejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }

    pub fn rejection(&self) -> Option<&StayRejection> {
        match self {
            ValidationOutcome::Accepted => None,
            ValidationOutcome::Rejected(reason) => Some(reason),
        }
    }
}

impl From<StayRejection> for ValidationOutcome {
    fn from(reason: StayRejection) -> Self {
        ValidationOutcome::Rejected(reason)
    }
}

/// Check the date and rate rules (steps 4–6) against an already loaded unit
pub fn check_rates(unit: &Unit, check_in: NaiveDate, check_out: NaiveDate) -> Result<(), StayRejection> {
    if !unit.has_rates() {
        return Err(StayRejection::NoRates);
    }

    // Every night, not just the boundary nights
    if let Some(night) = check_in
        .iter_days()
        .take_while(|d| *d < check_out)
        .find(|d| resolve_rate(*d, &unit.rate_windows).is_none())
    {
        return Err(StayRejection::UncoveredNight(night));
    }

    if unit.mandatory_check_in_out {
        let window = resolve_rate(check_in, &unit.rate_windows)
            .ok_or(StayRejection::UncoveredNight(check_in))?;

        if check_in.weekday() != window.start_day || check_out.weekday() != window.end_day {
            return Err(StayRejection::MisalignedCheckInOut {
                check_in: check_in.weekday(),
                check_out: check_out.weekday(),
                expected_check_in: window.start_day,
                expected_check_out: window.end_day,
            });
        }
    }

    Ok(())
}

/// Validates requested stays
pub struct StayValidator<UR, RR, C>
where
    UR: UnitRepository,
    RR: ReservationRepository,
    C: Clock + ?Sized,
{
    units: Arc<UR>,
    availability: Arc<AvailabilityService<RR>>,
    clock: Arc<C>,
}

impl<UR, RR, C> StayValidator<UR, RR, C>
where
    UR: UnitRepository,
    RR: ReservationRepository,
    C: Clock + ?Sized,
{
    pub fn new(units: Arc<UR>, availability: Arc<AvailabilityService<RR>>, clock: Arc<C>) -> Self {
        Self {
            units,
            availability,
            clock,
        }
    }

    /// Validate a stay on a unit
    pub async fn validate(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<ValidationOutcome, DomainError> {
        let outcome = self.run_checks(unit_id, check_in, check_out).await?;

        match &outcome {
            ValidationOutcome::Accepted => {
                tracing::debug!(unit_id = %unit_id, %check_in, %check_out, "Stay accepted");
            }
            ValidationOutcome::Rejected(reason) => {
                tracing::debug!(
                    unit_id = %unit_id,
                    %check_in,
                    %check_out,
                    code = reason.code(),
                    %reason,
                    "Stay rejected"
                );
            }
        }

        Ok(outcome)
    }

    async fn run_checks(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<ValidationOutcome, DomainError> {
        if check_in >= check_out {
            return Ok(StayRejection::InvalidRange.into());
        }

        if check_in < self.clock.today() {
            return Ok(StayRejection::PastDate.into());
        }

        let Some(unit) = self.units.find_by_id(unit_id).await? else {
            return Ok(StayRejection::UnitNotFound.into());
        };

        if let Err(reason) = check_rates(&unit, check_in, check_out) {
            return Ok(reason.into());
        }

        let conflicts = self
            .availability
            .conflicts(unit_id, check_in, check_out)
            .await?;
        if let Some(existing) = conflicts.first() {
            return Ok(StayRejection::Overlap(existing.id).into());
        }

        Ok(ValidationOutcome::Accepted)
    }
}
