//! Complex handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::units::UnitResponse;
use crate::domain::entities::{Complex, ComplexId, NewComplex};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ComplexResponse {
    pub id: String,
    pub name: String,
    pub address: String,
    pub created_at: String,
}

impl From<Complex> for ComplexResponse {
    fn from(c: Complex) -> Self {
        Self {
            id: c.id.to_string(),
            name: c.name,
            address: c.address,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// GET /complexes
pub async fn list_complexes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ComplexResponse>>, AppError> {
    let complexes = state.unit_service.list_complexes().await?;
    Ok(Json(complexes.into_iter().map(Into::into).collect()))
}

/// POST /complexes
pub async fn create_complex(
    State(state): State<AppState>,
    Json(request): Json<NewComplex>,
) -> Result<(StatusCode, Json<ComplexResponse>), AppError> {
    let complex = state.unit_service.create_complex(&request).await?;
    Ok((StatusCode::CREATED, Json(complex.into())))
}

/// GET /complexes/:id
pub async fn get_complex(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ComplexResponse>, AppError> {
    let complex = state
        .unit_service
        .get_complex(&ComplexId(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Complex {} not found", id)))?;
    Ok(Json(complex.into()))
}

/// PUT /complexes/:id
pub async fn update_complex(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<NewComplex>,
) -> Result<Json<ComplexResponse>, AppError> {
    let complex = state
        .unit_service
        .update_complex(&ComplexId(id), &request)
        .await?;
    Ok(Json(complex.into()))
}

/// DELETE /complexes/:id
///
/// Refused with 409 while units still belong to the complex.
pub async fn delete_complex(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.unit_service.delete_complex(&ComplexId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /complexes/:id/units
pub async fn list_complex_units(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<UnitResponse>>, AppError> {
    let units = state
        .unit_service
        .list_complex_units(&ComplexId(id))
        .await?;
    Ok(Json(units.into_iter().map(Into::into).collect()))
}
