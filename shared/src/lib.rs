use serde::{Deserialize, Serialize};
use std::fmt;

/// A booked appointment as seen by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    /// Store-assigned identifier, never reused
    pub id: i64,
    pub customer_name: String,
    pub phone_number: String,
    /// Catalog label, e.g. "Haircut - $30"
    pub service: String,
    /// Local wall-clock time, `YYYY-MM-DDTHH:MM:SS`
    pub scheduled_at: String,
}

/// One entry of the salon's service catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOption {
    pub name: String,
    pub price: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCatalogResponse {
    pub services: Vec<ServiceOption>,
    /// Label of the entry the booking form should preselect
    pub default_service: String,
}

/// Raw booking form input. Everything is text; the backend validates it.
/// Missing fields read as empty so they fail validation like blank ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub phone_number: String,
    /// Service name or catalog label
    #[serde(default)]
    pub service: String,
    /// `YYYY-MM-DDTHH:MM`, `YYYY-MM-DDTHH:MM:SS` or `YYYY-MM-DD HH:MM:SS`
    #[serde(default)]
    pub scheduled_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateAppointmentResponse {
    pub id: i64,
    pub appointment: Appointment,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
}

/// A row of the appointment listing, formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedAppointment {
    pub id: i64,
    pub customer_name: String,
    pub phone_number: String,
    pub service: String,
    /// `MM/DD/YYYY hh:mm AM|PM`
    pub formatted_date_time: String,
    pub raw_scheduled_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentTableResponse {
    pub columns: Vec<String>,
    pub rows: Vec<FormattedAppointment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAvailabilityResponse {
    pub scheduled_at: String,
    pub available: bool,
    pub conflicting_appointment_id: Option<i64>,
}

/// Category of a failed booking request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingErrorKind {
    Validation,
    SlotConflict,
    Persistence,
}

impl fmt::Display for BookingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BookingErrorKind::Validation => "validation",
            BookingErrorKind::SlotConflict => "slot_conflict",
            BookingErrorKind::Persistence => "persistence",
        };
        write!(f, "{}", name)
    }
}

/// Error body returned for any rejected or failed request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingErrorResponse {
    pub kind: BookingErrorKind,
    /// Offending field for validation errors (`customer_name`, `phone_number`, `service`, `scheduled_at`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}
