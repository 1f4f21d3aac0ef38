//! # Salon Booking Backend
//!
//! Appointment booking for a small salon: a fixed service catalog, an
//! append-only appointment book and a minimum-separation rule between
//! appointments on the same day.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (booking, conflict checking, listing)
//!     ↓
//! Storage Layer (SQLite or CSV)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod logging;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::{
    AppointmentService, AppointmentTableService, BookingService, Clock, ConflictChecker, SystemClock,
};
use crate::storage::AppointmentStorage;

/// Services shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub booking_service: BookingService,
    pub appointment_service: AppointmentService,
    pub appointment_table_service: AppointmentTableService,
}

/// Wire the domain services around one appointment store
pub fn build_app_state(
    appointment_repository: Arc<dyn AppointmentStorage>,
    conflict_checker: ConflictChecker,
    clock: Arc<dyn Clock>,
) -> AppState {
    AppState {
        booking_service: BookingService::with_clock(appointment_repository.clone(), conflict_checker, clock),
        appointment_service: AppointmentService::new(appointment_repository),
        appointment_table_service: AppointmentTableService::new(),
    }
}

/// Open the configured store and build the application state
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    config.validate()?;

    info!("Setting up storage");
    let appointment_repository = storage::open_appointment_storage(config).await?;

    info!(
        "Setting up domain model (minimum separation: {} minutes)",
        config.min_separation_minutes
    );
    let conflict_checker = ConflictChecker::with_minutes(config.min_separation_minutes);

    Ok(build_app_state(appointment_repository, conflict_checker, Arc::new(SystemClock)))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/services", get(io::list_services))
        .route("/appointments", get(io::list_appointments).post(io::create_appointment))
        .route("/appointments/table", get(io::get_appointment_table))
        .route("/availability", get(io::check_availability));

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}
