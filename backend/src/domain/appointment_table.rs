//! Appointment table domain logic for the salon.
//!
//! Turns stored appointments into the rows shown on the listing tab:
//! Customer Name, Phone, Service and Date & Time, with the date rendered the
//! way the front desk reads it (`10/17/2026 02:00 PM`).

use chrono::NaiveDateTime;
use shared::FormattedAppointment;

use crate::domain::models::appointment::DTO_DATETIME_FORMAT;
use crate::domain::models::Appointment;

pub const TABLE_COLUMNS: [&str; 4] = ["Customer Name", "Phone", "Service", "Date & Time"];

/// Date & Time column layout: "10/17/2026 02:00 PM"
pub const TABLE_DATETIME_FORMAT: &str = "%m/%d/%Y %I:%M %p";

/// Appointment table service that handles listing presentation
#[derive(Clone, Default)]
pub struct AppointmentTableService;

impl AppointmentTableService {
    pub fn new() -> Self {
        Self
    }

    pub fn columns(&self) -> Vec<String> {
        TABLE_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    /// Format appointments in the order given
    pub fn format_appointments_for_table(&self, appointments: &[Appointment]) -> Vec<FormattedAppointment> {
        appointments
            .iter()
            .map(|appointment| self.format_single_appointment(appointment))
            .collect()
    }

    pub fn format_single_appointment(&self, appointment: &Appointment) -> FormattedAppointment {
        FormattedAppointment {
            id: appointment.id,
            customer_name: appointment.customer_name.clone(),
            phone_number: appointment.phone_number.clone(),
            service: appointment.service.label(),
            formatted_date_time: self.format_date_time(appointment.scheduled_at),
            raw_scheduled_at: appointment.scheduled_at.format(DTO_DATETIME_FORMAT).to_string(),
        }
    }

    pub fn format_date_time(&self, scheduled_at: NaiveDateTime) -> String {
        scheduled_at.format(TABLE_DATETIME_FORMAT).to_string()
    }
}
