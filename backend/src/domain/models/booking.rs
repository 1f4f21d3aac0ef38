use chrono::NaiveDateTime;
use std::fmt;

use super::appointment::AppointmentId;

/// Booking form field that failed validation, in validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationField {
    CustomerName,
    PhoneNumber,
    Service,
    ScheduledAt,
}

impl ValidationField {
    /// Wire name of the field
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationField::CustomerName => "customer_name",
            ValidationField::PhoneNumber => "phone_number",
            ValidationField::Service => "service",
            ValidationField::ScheduledAt => "scheduled_at",
        }
    }

    /// Message shown to the receptionist
    pub fn message(&self) -> &'static str {
        match self {
            ValidationField::CustomerName => "Please enter customer name.",
            ValidationField::PhoneNumber => "Please enter phone number.",
            ValidationField::Service => "Please select a service.",
            ValidationField::ScheduledAt => "Please select a future date and time.",
        }
    }
}

impl fmt::Display for ValidationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The backing store could not be reached, or a read or write failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{context}: {message}")]
pub struct PersistenceError {
    pub context: String,
    pub message: String,
}

impl PersistenceError {
    /// A failed insert
    pub fn saving(error: anyhow::Error) -> Self {
        Self::new("Error saving appointment", error)
    }

    /// A failed lookup or listing
    pub fn reading(error: anyhow::Error) -> Self {
        Self::new("Error reading appointments", error)
    }

    fn new(context: &str, error: anyhow::Error) -> Self {
        Self {
            context: context.to_string(),
            message: format!("{:#}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BookingError {
    #[error("{}", .field.message())]
    Validation { field: ValidationField },

    #[error("The time slot {requested} is within the conflict window of appointment #{conflicting_id} at {conflicting_at}")]
    SlotConflict {
        requested: NaiveDateTime,
        conflicting_id: AppointmentId,
        conflicting_at: NaiveDateTime,
    },

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl BookingError {
    pub fn validation(field: ValidationField) -> Self {
        BookingError::Validation { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_names_the_field() {
        let err = BookingError::validation(ValidationField::PhoneNumber);
        assert_eq!(err.to_string(), "Please enter phone number.");
    }

    #[test]
    fn test_persistence_error_keeps_context_chain() {
        let source = anyhow::anyhow!("disk full").context("writing appointments.csv");
        let err: BookingError = PersistenceError::saving(source).into();
        assert_eq!(err.to_string(), "Error saving appointment: writing appointments.csv: disk full");
    }

    #[test]
    fn test_read_failures_do_not_claim_a_save() {
        let err = PersistenceError::reading(anyhow::anyhow!("connection refused"));
        assert_eq!(err.to_string(), "Error reading appointments: connection refused");
    }
}
