use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use shared::{
    Appointment as SharedAppointment, BookingErrorKind, BookingErrorResponse, CreateAppointmentRequest,
    ServiceOption,
};

use crate::domain::commands::appointments::BookAppointmentCommand;
use crate::domain::models::appointment::DTO_DATETIME_FORMAT;
use crate::domain::models::{Appointment as DomainAppointment, BookingError, PersistenceError, SalonService};

pub struct AppointmentMapper;

impl AppointmentMapper {
    pub fn to_dto(domain: DomainAppointment) -> SharedAppointment {
        SharedAppointment {
            id: domain.id,
            customer_name: domain.customer_name,
            phone_number: domain.phone_number,
            service: domain.service.label(),
            scheduled_at: domain.scheduled_at.format(DTO_DATETIME_FORMAT).to_string(),
        }
    }

    pub fn to_command(request: CreateAppointmentRequest) -> BookAppointmentCommand {
        BookAppointmentCommand {
            customer_name: request.customer_name,
            phone_number: request.phone_number,
            service: request.service,
            scheduled_at: request.scheduled_at,
        }
    }

    pub fn service_to_dto(service: SalonService) -> ServiceOption {
        ServiceOption {
            name: service.name().to_string(),
            price: service.price(),
            label: service.label(),
        }
    }

    /// HTTP status and body for a failed booking
    pub fn error_to_response(error: &BookingError) -> (StatusCode, BookingErrorResponse) {
        match error {
            BookingError::Validation { field } => (
                StatusCode::BAD_REQUEST,
                BookingErrorResponse {
                    kind: BookingErrorKind::Validation,
                    field: Some(field.as_str().to_string()),
                    message: error.to_string(),
                },
            ),
            BookingError::SlotConflict { .. } => (
                StatusCode::CONFLICT,
                BookingErrorResponse {
                    kind: BookingErrorKind::SlotConflict,
                    field: None,
                    message: error.to_string(),
                },
            ),
            BookingError::Persistence(persistence) => Self::persistence_to_response(persistence),
        }
    }

    pub fn persistence_to_response(error: &PersistenceError) -> (StatusCode, BookingErrorResponse) {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            BookingErrorResponse {
                kind: BookingErrorKind::Persistence,
                field: None,
                message: error.to_string(),
            },
        )
    }

    /// 400 for a request body that is not a booking form
    pub fn invalid_body(rejection: &JsonRejection) -> (StatusCode, BookingErrorResponse) {
        (
            StatusCode::BAD_REQUEST,
            BookingErrorResponse {
                kind: BookingErrorKind::Validation,
                field: None,
                message: format!("Invalid booking request: {}", rejection.body_text()),
            },
        )
    }

    /// 400 for a malformed query parameter
    pub fn invalid_parameter(name: &str, value: &str) -> (StatusCode, BookingErrorResponse) {
        (
            StatusCode::BAD_REQUEST,
            BookingErrorResponse {
                kind: BookingErrorKind::Validation,
                field: Some(name.to_string()),
                message: format!("Invalid {}: '{}'", name, value),
            },
        )
    }
}
