//! Reservation handlers
//!
//! Creating, reading, confirming and cancelling reservations.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{
    NewReservation, Reservation, ReservationId, ReservationStatus, UnitId, UserId,
};
use crate::error::AppError;
use crate::AppState;

/// Query parameters for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListReservationsQuery {
    pub status: Option<String>,
}

/// Body of confirm and cancel requests
#[derive(Debug, Deserialize)]
pub struct ActorRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct ReservationResponse {
    pub id: String,
    pub unit_id: String,
    pub user_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: String,
    pub total_price: Decimal,
    pub created_at: String,
}

impl From<Reservation> for ReservationResponse {
    fn from(r: Reservation) -> Self {
        Self {
            id: r.id.to_string(),
            unit_id: r.unit_id.to_string(),
            user_id: r.user_id.to_string(),
            check_in: r.check_in,
            check_out: r.check_out,
            status: r.status.to_string(),
            total_price: r.total_price,
            created_at: r.created_at.to_rfc3339(),
        }
    }
}

/// GET /reservations?status=
pub async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<ListReservationsQuery>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let status = query
        .status
        .as_deref()
        .map(|s| s.parse::<ReservationStatus>())
        .transpose()
        .map_err(AppError::BadRequest)?;

    let reservations = state.reservation_service.list(status).await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// GET /reservations/:id
pub async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .reservation_service
        .get(&ReservationId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

    Ok(Json(reservation.into()))
}

/// GET /units/:id/reservations
pub async fn list_unit_reservations(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, AppError> {
    let reservations = state
        .reservation_service
        .list_for_unit(&UnitId(unit_id))
        .await?;
    Ok(Json(reservations.into_iter().map(Into::into).collect()))
}

/// POST /units/:id/reservations
///
/// Validate, price and store a pending reservation.
pub async fn create_reservation(
    State(state): State<AppState>,
    Path(unit_id): Path<Uuid>,
    Json(request): Json<NewReservation>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let reservation = state
        .reservation_service
        .create(request, UnitId(unit_id))
        .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// POST /reservations/:id/confirm
pub async fn confirm_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActorRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .reservation_service
        .confirm(&ReservationId(id), &UserId(request.user_id))
        .await?;

    Ok(Json(reservation.into()))
}

/// POST /reservations/:id/cancel
pub async fn cancel_reservation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ActorRequest>,
) -> Result<Json<ReservationResponse>, AppError> {
    let reservation = state
        .reservation_service
        .cancel(&ReservationId(id), &UserId(request.user_id))
        .await?;

    Ok(Json(reservation.into()))
}
