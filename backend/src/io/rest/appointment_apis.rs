//! # REST API for Appointments
//!
//! Endpoints for booking, listing and probing appointment slots.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{
    AppointmentListResponse, AppointmentTableResponse, CreateAppointmentRequest, CreateAppointmentResponse,
    SlotAvailabilityResponse,
};
use tracing::{error, info, warn};

use crate::domain::commands::appointments::{AppointmentListQuery, CheckAvailabilityQuery};
use crate::domain::models::appointment::{parse_wall_clock, DTO_DATETIME_FORMAT};
use crate::domain::models::PersistenceError;
use crate::io::rest::mappers::appointment_mapper::AppointmentMapper;
use crate::AppState;

// Query parameters for appointment listing API
#[derive(Debug, Deserialize)]
pub struct AppointmentListParams {
    pub date: Option<String>,
}

// Query parameters for availability API
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub at: String,
}

/// List appointments ordered by time, optionally for one day (`?date=YYYY-MM-DD`)
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<AppointmentListParams>,
) -> impl IntoResponse {
    info!("GET /api/appointments - query: {:?}", params);

    let date = match params.date.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                warn!("Rejected listing query with date '{}'", raw);
                let (status, body) = AppointmentMapper::invalid_parameter("date", raw);
                return (status, Json(body)).into_response();
            }
        },
    };

    match state.appointment_service.list_appointments(AppointmentListQuery { date }).await {
        Ok(result) => {
            let appointments = result.appointments.into_iter().map(AppointmentMapper::to_dto).collect();
            (StatusCode::OK, Json(AppointmentListResponse { appointments })).into_response()
        }
        Err(e) => {
            error!("Failed to list appointments: {:#}", e);
            let (status, body) = AppointmentMapper::persistence_to_response(&PersistenceError::reading(e));
            (status, Json(body)).into_response()
        }
    }
}

/// Book an appointment from raw form input
pub async fn create_appointment(
    State(state): State<AppState>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> impl IntoResponse {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!("POST /api/appointments - rejected body: {}", rejection.body_text());
            let (status, body) = AppointmentMapper::invalid_body(&rejection);
            return (status, Json(body)).into_response();
        }
    };
    info!("POST /api/appointments - request: {:?}", request);

    match state.booking_service.book(AppointmentMapper::to_command(request)).await {
        Ok(result) => {
            let response = CreateAppointmentResponse {
                id: result.id,
                appointment: AppointmentMapper::to_dto(result.appointment),
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            let (status, body) = AppointmentMapper::error_to_response(&e);
            (status, Json(body)).into_response()
        }
    }
}

/// Listing rows formatted for the front desk
pub async fn get_appointment_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/appointments/table");

    match state.appointment_service.list_appointments(AppointmentListQuery::default()).await {
        Ok(result) => {
            let table_response = AppointmentTableResponse {
                columns: state.appointment_table_service.columns(),
                rows: state
                    .appointment_table_service
                    .format_appointments_for_table(&result.appointments),
            };
            (StatusCode::OK, Json(table_response)).into_response()
        }
        Err(e) => {
            error!("Failed to get appointment table data: {:#}", e);
            let (status, body) = AppointmentMapper::persistence_to_response(&PersistenceError::reading(e));
            (status, Json(body)).into_response()
        }
    }
}

/// Whether a slot would pass the conflict check right now (`?at=...`)
pub async fn check_availability(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> impl IntoResponse {
    info!("GET /api/availability - query: {:?}", params);

    let Some(scheduled_at) = parse_wall_clock(&params.at) else {
        let (status, body) = AppointmentMapper::invalid_parameter("at", &params.at);
        return (status, Json(body)).into_response();
    };

    match state
        .booking_service
        .check_availability(CheckAvailabilityQuery { scheduled_at })
        .await
    {
        Ok(result) => {
            let response = SlotAvailabilityResponse {
                scheduled_at: result.scheduled_at.format(DTO_DATETIME_FORMAT).to_string(),
                available: result.available,
                conflicting_appointment_id: result.conflicting_appointment_id,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to check availability: {}", e);
            let (status, body) = AppointmentMapper::persistence_to_response(&e);
            (status, Json(body)).into_response()
        }
    }
}
