//! Booking API Server
//!
//! Reservation eligibility and pricing for rentable units: weekly rate
//! windows, stay validation, pricing and the reservation lifecycle.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    InMemoryComplexRepository, InMemoryReservationRepository, InMemoryUnitRepository, SystemClock,
};
use app::{ReservationService, UnitLocks, UnitService};
use config::Config;
use domain::entities::NewUnit;
use domain::ports::Clock;

type Reservations =
    ReservationService<InMemoryUnitRepository, InMemoryReservationRepository, dyn Clock>;
type Units =
    UnitService<InMemoryUnitRepository, InMemoryComplexRepository, InMemoryReservationRepository>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub reservation_service: Arc<Reservations>,
    pub unit_service: Arc<Units>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    pub fn new(
        units: Arc<InMemoryUnitRepository>,
        reservations: Arc<InMemoryReservationRepository>,
        complexes: Arc<InMemoryComplexRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        // Both services write units, so they serialize on the same locks
        let locks = Arc::new(UnitLocks::new());
        Self {
            reservation_service: Arc::new(ReservationService::new(
                units.clone(),
                reservations.clone(),
                clock.clone(),
                locks.clone(),
            )),
            unit_service: Arc::new(UnitService::new(
                units,
                complexes,
                reservations,
                locks,
            )),
            clock,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router with all routes and middleware
pub fn build_router(state: AppState, config: &Config) -> Router {
    let cors = if config.cors_allow_any {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    Router::new()
        .route("/health", get(health))
        // Complexes
        .route(
            "/complexes",
            get(handlers::list_complexes).post(handlers::create_complex),
        )
        .route(
            "/complexes/:id",
            get(handlers::get_complex)
                .put(handlers::update_complex)
                .delete(handlers::delete_complex),
        )
        .route("/complexes/:id/units", get(handlers::list_complex_units))
        // Units
        .route("/units", get(handlers::list_units).post(handlers::create_unit))
        .route(
            "/units/:id",
            get(handlers::get_unit)
                .put(handlers::update_unit)
                .delete(handlers::delete_unit),
        )
        .route("/units/:id/rates", put(handlers::replace_rates))
        .route("/units/:id/availability", get(handlers::check_availability))
        .route("/units/:id/validate", get(handlers::validate_stay))
        .route("/units/:id/quote", get(handlers::quote_stay))
        .route("/units/:id/aligned-stay", get(handlers::aligned_stay))
        .route(
            "/units/:id/reservations",
            get(handlers::list_unit_reservations).post(handlers::create_reservation),
        )
        // Reservations
        .route("/reservations", get(handlers::list_reservations))
        .route("/reservations/:id", get(handlers::get_reservation))
        .route(
            "/reservations/:id/confirm",
            post(handlers::confirm_reservation),
        )
        .route("/reservations/:id/cancel", post(handlers::cancel_reservation))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create every unit listed in a JSON seed file
async fn load_seed(state: &AppState, path: &Path) -> anyhow::Result<usize> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read seed file {}", path.display()))?;
    let units: Vec<NewUnit> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse seed file {}", path.display()))?;

    for unit in &units {
        state
            .unit_service
            .create_unit(unit)
            .await
            .with_context(|| format!("Failed to seed unit {:?}", unit.title))?;
    }
    Ok(units.len())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,booking_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Booking API...");

    // Load configuration
    let config = Config::from_env();

    // Create adapters and services
    let state = AppState::new(
        Arc::new(InMemoryUnitRepository::new()),
        Arc::new(InMemoryReservationRepository::new()),
        Arc::new(InMemoryComplexRepository::new()),
        Arc::new(SystemClock),
    );

    if let Some(path) = &config.seed_path {
        let count = load_seed(&state, Path::new(path)).await?;
        tracing::info!(path = %path, units = count, "Seed data loaded");
    }

    let app = build_router(state, &config);

    // Start server
    let addr = SocketAddr::new(config.bind_addr, config.port);
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
