//! Unit handlers
//!
//! Unit administration plus the read-only engine queries: availability,
//! stay validation, quotes and aligned-stay suggestions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::app::{AlignedStay, RateOverlap, ValidationOutcome};
use crate::domain::entities::{NewRateWindow, NewUnit, RateWindow, Unit, UnitChanges, UnitId};
use crate::domain::ports::Clock;
use crate::error::AppError;
use crate::AppState;

/// Query for a stay `[check_in, check_out)`
#[derive(Debug, Deserialize)]
pub struct StayQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayQuery {
    fn ensure_ordered(&self) -> Result<(), AppError> {
        if self.check_in >= self.check_out {
            return Err(AppError::BadRequest(
                "check_out must be after check_in".to_string(),
            ));
        }
        Ok(())
    }
}

/// Availability is asked for one night or for a whole stay
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: Option<NaiveDate>,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

/// Query for the aligned-stay search; defaults to today
#[derive(Debug, Deserialize)]
pub struct FromQuery {
    pub from: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct RateWindowResponse {
    pub id: String,
    pub start_day: String,
    pub end_day: String,
    pub price_per_night: Decimal,
}

impl From<RateWindow> for RateWindowResponse {
    fn from(w: RateWindow) -> Self {
        Self {
            id: w.id.to_string(),
            start_day: w.start_day.to_string(),
            end_day: w.end_day.to_string(),
            price_per_night: w.price_per_night,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UnitResponse {
    pub id: String,
    pub complex_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub capacity: i32,
    pub bedroom_count: i32,
    pub mandatory_check_in_out: bool,
    pub is_available: bool,
    pub rate_windows: Vec<RateWindowResponse>,
    pub created_at: String,
}

impl From<Unit> for UnitResponse {
    fn from(u: Unit) -> Self {
        Self {
            id: u.id.to_string(),
            complex_id: u.complex_id.map(|c| c.to_string()),
            title: u.title,
            description: u.description,
            capacity: u.capacity,
            bedroom_count: u.bedroom_count,
            mandatory_check_in_out: u.mandatory_check_in_out,
            is_available: u.is_available,
            rate_windows: u.rate_windows.into_iter().map(Into::into).collect(),
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// Response for replacing rate windows
#[derive(Debug, Serialize)]
pub struct RateUpdateResponse {
    pub unit: UnitResponse,
    /// Window pairs that share a weekday; the earlier one wins
    pub overlaps: Vec<RateOverlap>,
}

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub unit_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    pub available: bool,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub ok: bool,
    pub reason_code: Option<&'static str>,
    pub reason: Option<String>,
}

impl From<ValidationOutcome> for ValidationResponse {
    fn from(outcome: ValidationOutcome) -> Self {
        let rejection = outcome.rejection();
        Self {
            ok: outcome.is_accepted(),
            reason_code: rejection.map(|r| r.code()),
            reason: rejection.map(|r| r.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub unit_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub total_price: Decimal,
}

/// GET /units
pub async fn list_units(State(state): State<AppState>) -> Result<Json<Vec<UnitResponse>>, AppError> {
    let units = state.unit_service.list_units().await?;
    Ok(Json(units.into_iter().map(Into::into).collect()))
}

/// POST /units
///
/// Create a unit with its initial rate windows.
pub async fn create_unit(
    State(state): State<AppState>,
    Json(request): Json<NewUnit>,
) -> Result<(StatusCode, Json<UnitResponse>), AppError> {
    let unit = state.unit_service.create_unit(&request).await?;
    Ok((StatusCode::CREATED, Json(unit.into())))
}

/// GET /units/:id
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UnitResponse>, AppError> {
    let unit = load_unit(&state, id).await?;
    Ok(Json(unit.into()))
}

/// PUT /units/:id
///
/// Change a unit's attributes. Absent fields are left as they are.
pub async fn update_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(changes): Json<UnitChanges>,
) -> Result<Json<UnitResponse>, AppError> {
    let unit = state.unit_service.update_unit(&UnitId(id), changes).await?;
    Ok(Json(unit.into()))
}

/// DELETE /units/:id
pub async fn delete_unit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.unit_service.delete_unit(&UnitId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /units/:id/rates
///
/// Replace every rate window of a unit. Order in the body is resolution order.
pub async fn replace_rates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(windows): Json<Vec<NewRateWindow>>,
) -> Result<Json<RateUpdateResponse>, AppError> {
    let result = state
        .unit_service
        .replace_rate_windows(&UnitId(id), windows)
        .await?;

    Ok(Json(RateUpdateResponse {
        unit: result.unit.into(),
        overlaps: result.overlaps,
    }))
}

/// GET /units/:id/availability?date=
/// GET /units/:id/availability?check_in=&check_out=
pub async fn check_availability(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let unit = load_unit(&state, id).await?;
    let availability = state.reservation_service.availability();

    let available = match (query.date, query.check_in, query.check_out) {
        (Some(date), None, None) => availability.is_available(&unit.id, date).await?,
        (None, Some(check_in), Some(check_out)) => {
            StayQuery { check_in, check_out }.ensure_ordered()?;
            availability
                .is_range_available(&unit.id, check_in, check_out)
                .await?
        }
        _ => {
            return Err(AppError::BadRequest(
                "Give either date or both check_in and check_out".to_string(),
            ))
        }
    };

    Ok(Json(AvailabilityResponse {
        unit_id: unit.id.to_string(),
        date: query.date,
        check_in: query.check_in,
        check_out: query.check_out,
        available,
    }))
}

/// GET /units/:id/validate?check_in=&check_out=
///
/// A rejected stay is a 200 with `ok: false`.
pub async fn validate_stay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StayQuery>,
) -> Result<Json<ValidationResponse>, AppError> {
    let outcome = state
        .reservation_service
        .validator()
        .validate(&UnitId(id), query.check_in, query.check_out)
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /units/:id/quote?check_in=&check_out=
pub async fn quote_stay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<StayQuery>,
) -> Result<Json<QuoteResponse>, AppError> {
    query.ensure_ordered()?;
    let quote = state
        .reservation_service
        .pricing()
        .quote(&UnitId(id), query.check_in, query.check_out)
        .await?;

    Ok(Json(QuoteResponse {
        unit_id: quote.unit_id.to_string(),
        check_in: quote.check_in,
        check_out: quote.check_out,
        nights: quote.nights,
        total_price: quote.total_price,
    }))
}

/// GET /units/:id/aligned-stay?from=
///
/// Earliest stay that matches one of the unit's rate windows exactly.
pub async fn aligned_stay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<FromQuery>,
) -> Result<Json<AlignedStay>, AppError> {
    let from = query.from.unwrap_or_else(|| state.clock.today());
    state
        .unit_service
        .suggest_aligned_stay(&UnitId(id), from)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unit {} has no rate windows", id)))
}

async fn load_unit(state: &AppState, id: Uuid) -> Result<Unit, AppError> {
    state
        .unit_service
        .get_unit(&UnitId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Unit {} not found", id)))
}
