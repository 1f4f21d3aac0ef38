//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the DTOs defined in the
//! `shared` crate to these internal types.

pub mod appointments {
    use crate::domain::models::{Appointment, AppointmentId};
    use chrono::{NaiveDate, NaiveDateTime};

    /// Raw booking form input, not yet validated.
    #[derive(Debug, Clone)]
    pub struct BookAppointmentCommand {
        pub customer_name: String,
        pub phone_number: String,
        pub service: String,
        pub scheduled_at: String,
    }

    /// Result of a confirmed booking.
    #[derive(Debug, Clone)]
    pub struct BookAppointmentResult {
        pub id: AppointmentId,
        pub appointment: Appointment,
        pub success_message: String,
    }

    /// Query for the appointment listing; `date` narrows it to one calendar day.
    #[derive(Debug, Clone, Default)]
    pub struct AppointmentListQuery {
        pub date: Option<NaiveDate>,
    }

    /// Result of listing appointments, ordered by scheduled time.
    #[derive(Debug, Clone)]
    pub struct AppointmentListResult {
        pub appointments: Vec<Appointment>,
    }

    /// Query for a non-binding availability probe.
    #[derive(Debug, Clone)]
    pub struct CheckAvailabilityQuery {
        pub scheduled_at: NaiveDateTime,
    }

    #[derive(Debug, Clone)]
    pub struct CheckAvailabilityResult {
        pub scheduled_at: NaiveDateTime,
        pub available: bool,
        pub conflicting_appointment_id: Option<AppointmentId>,
    }
}
