//! Pricing service
//!
//! Sums the nightly rate of every night in `[check_in, check_out)`. Nights are
//! resolved with the same first-match rule the stay validator uses, so the two
//! never disagree about coverage.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::entities::{resolve_rate, Unit, UnitId};
use crate::domain::ports::UnitRepository;
use crate::error::BookingError;

/// Price breakdown for a stay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub unit_id: UnitId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub total_price: Decimal,
}

/// Price an already loaded unit. An empty or inverted range costs nothing.
pub fn price_stay(unit: &Unit, check_in: NaiveDate, check_out: NaiveDate) -> Result<Quote, BookingError> {
    if !unit.has_rates() {
        return Err(BookingError::NoRates(unit.id));
    }

    let mut total_price = Decimal::ZERO;
    let mut nights = 0;
    for night in check_in.iter_days().take_while(|d| *d < check_out) {
        let window = resolve_rate(night, &unit.rate_windows)
            .ok_or(BookingError::UncoveredNight(night))?;

        if window.price_per_night < Decimal::ZERO {
            return Err(BookingError::CorruptRate(window.id));
        }

        total_price = total_price
            .checked_add(window.price_per_night)
            .ok_or(BookingError::PriceOverflow(unit.id))?;
        nights += 1;
        tracing::trace!(
            unit_id = %unit.id,
            %night,
            rate_window_id = %window.id,
            price = %window.price_per_night,
            running_total = %total_price,
            "Priced night"
        );
    }

    Ok(Quote {
        unit_id: unit.id,
        check_in,
        check_out,
        nights,
        total_price,
    })
}

/// Service for pricing stays
pub struct PricingService<UR>
where
    UR: UnitRepository,
{
    units: Arc<UR>,
}

impl<UR> PricingService<UR>
where
    UR: UnitRepository,
{
    pub fn new(units: Arc<UR>) -> Self {
        Self { units }
    }

    /// Total price of a stay
    pub async fn calculate_total(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Decimal, BookingError> {
        Ok(self.quote(unit_id, check_in, check_out).await?.total_price)
    }

    /// Total price and night count of a stay
    pub async fn quote(
        &self,
        unit_id: &UnitId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Quote, BookingError> {
        let unit = self
            .units
            .find_by_id(unit_id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Unit {} not found", unit_id)))?;

        let quote = price_stay(&unit, check_in, check_out)?;
        tracing::debug!(
            unit_id = %unit_id,
            %check_in,
            %check_out,
            nights = quote.nights,
            total = %quote.total_price,
            "Calculated total price"
        );
        Ok(quote)
    }
}
