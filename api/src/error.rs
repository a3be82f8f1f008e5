//! Unified error types for the booking API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Repository and entity-construction errors
//! - `BookingError`: Reservation engine errors (validation, pricing, lifecycle)
//! - `AppError`: Application layer errors (wraps the above for HTTP responses)
//!
//! A rejected stay is not an error by itself; the validator reports it as a
//! `StayRejection`. It only becomes `BookingError::ValidationFailed` when a
//! reservation is created from a rejected stay.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::app::StayRejection;
use crate::domain::entities::{RateWindowId, UnitId};

/// Domain layer errors - persistence and entity invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

}

/// Reservation engine errors
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(StayRejection),

    #[error("Selected dates overlap with an existing reservation")]
    Overlap,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("No rates defined for unit {0}")]
    NoRates(UnitId),

    #[error("No valid rate found for the night of {0}")]
    UncoveredNight(NaiveDate),

    #[error("Rate window {0} has a negative price per night")]
    CorruptRate(RateWindowId),

    #[error("Total price for unit {0} exceeds the supported range")]
    PriceOverflow(UnitId),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Booking(#[from] BookingError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

fn domain_parts(e: &DomainError) -> (StatusCode, &'static str, Option<String>) {
    match e {
        DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        DomainError::Validation(msg) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "Validation error",
            Some(msg.clone()),
        ),
        DomainError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", Some(msg.clone())),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut code = None;
        let (status, error, details) = match &self {
            AppError::Domain(e) => domain_parts(e),
            AppError::Booking(BookingError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, "Not found", Some(msg.clone()))
            }
            AppError::Booking(BookingError::ValidationFailed(reason)) => {
                code = Some(reason.code());
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Validation failed",
                    Some(reason.to_string()),
                )
            }
            AppError::Booking(BookingError::Overlap) => {
                code = Some("overlap");
                (StatusCode::CONFLICT, "Overlap", Some(self.to_string()))
            }
            AppError::Booking(BookingError::InvalidState(msg)) => {
                (StatusCode::CONFLICT, "Invalid state", Some(msg.clone()))
            }
            AppError::Booking(e @ BookingError::NoRates(_)) => {
                code = Some("no_rates");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Pricing failed",
                    Some(e.to_string()),
                )
            }
            AppError::Booking(e @ BookingError::UncoveredNight(_)) => {
                code = Some("uncovered_night");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Pricing failed",
                    Some(e.to_string()),
                )
            }
            AppError::Booking(e @ BookingError::PriceOverflow(_)) => {
                code = Some("price_overflow");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "Pricing failed",
                    Some(e.to_string()),
                )
            }
            AppError::Booking(e @ BookingError::CorruptRate(_)) => {
                tracing::error!("Corrupt rate data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
            AppError::Booking(BookingError::Domain(e)) => domain_parts(e),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not found", Some(msg.clone())),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            code,
            details,
        });

        (status, body).into_response()
    }
}
