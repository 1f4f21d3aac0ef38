//! Booking service domain logic for the salon.
//!
//! A booking request moves through `Received -> Validated -> ConflictChecked
//! -> Persisted`, or stops as a rejection at the first failing step. Nothing
//! is written before the final insert, so a rejected or failed request
//! leaves the appointment book untouched.
//!
//! The read-check-write part runs under a per-date lock, which keeps two
//! concurrent requests for the same day from both passing the conflict check.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::clock::Clock;
use crate::domain::commands::appointments::{
    BookAppointmentCommand, BookAppointmentResult, CheckAvailabilityQuery, CheckAvailabilityResult,
};
use crate::domain::conflict_checker::ConflictChecker;
use crate::domain::date_locks::DateLocks;
use crate::domain::models::appointment::parse_wall_clock;
use crate::domain::models::{BookingError, NewAppointment, PersistenceError, SalonService, ValidationField};
use crate::storage::AppointmentStorage;

pub const BOOKING_SUCCESS_MESSAGE: &str = "Appointment booked successfully!";

#[derive(Clone)]
pub struct BookingService {
    appointment_repository: Arc<dyn AppointmentStorage>,
    conflict_checker: ConflictChecker,
    clock: Arc<dyn Clock>,
    date_locks: DateLocks,
}

impl BookingService {
    pub fn with_clock(
        appointment_repository: Arc<dyn AppointmentStorage>,
        conflict_checker: ConflictChecker,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            appointment_repository,
            conflict_checker,
            clock,
            date_locks: DateLocks::new(),
        }
    }

    pub async fn book(&self, command: BookAppointmentCommand) -> Result<BookAppointmentResult, BookingError> {
        info!(
            "Booking request for '{}' ({}) at '{}'",
            command.service, command.customer_name, command.scheduled_at
        );

        let appointment = self.validate(&command).map_err(|e| {
            warn!("Booking rejected: {}", e);
            e
        })?;

        let date = appointment.scheduled_at.date();
        let _date_guard = self.date_locks.lock(date).await;

        let same_day = self
            .appointment_repository
            .find_appointments_on_date(date)
            .await
            .map_err(|e| {
                error!("Failed to read appointments on {}: {:#}", date, e);
                PersistenceError::reading(e)
            })?;

        if let Some(conflict) = self.conflict_checker.find_conflict(appointment.scheduled_at, &same_day) {
            let rejection = BookingError::SlotConflict {
                requested: appointment.scheduled_at,
                conflicting_id: conflict.id,
                conflicting_at: conflict.scheduled_at,
            };
            warn!("Booking rejected: {}", rejection);
            return Err(rejection);
        }

        let id = self
            .appointment_repository
            .insert_appointment(&appointment)
            .await
            .map_err(|e| {
                error!("Error saving appointment: {:#}", e);
                PersistenceError::saving(e)
            })?;

        info!("Appointment #{} booked for {}", id, appointment.scheduled_at);
        Ok(BookAppointmentResult {
            id,
            appointment: appointment.with_id(id),
            success_message: BOOKING_SUCCESS_MESSAGE.to_string(),
        })
    }

    /// Check the form fields in order; the first failure wins
    pub fn validate(&self, command: &BookAppointmentCommand) -> Result<NewAppointment, BookingError> {
        let customer_name = command.customer_name.trim();
        if customer_name.is_empty() {
            return Err(BookingError::validation(ValidationField::CustomerName));
        }

        let phone_number = command.phone_number.trim();
        if phone_number.is_empty() {
            return Err(BookingError::validation(ValidationField::PhoneNumber));
        }

        let service = command
            .service
            .parse::<SalonService>()
            .map_err(|_| BookingError::validation(ValidationField::Service))?;

        let scheduled_at = parse_wall_clock(&command.scheduled_at)
            .filter(|scheduled_at| *scheduled_at > self.clock.now())
            .ok_or_else(|| BookingError::validation(ValidationField::ScheduledAt))?;

        Ok(NewAppointment {
            customer_name: customer_name.to_string(),
            phone_number: phone_number.to_string(),
            service,
            scheduled_at,
        })
    }

    /// Advisory availability probe; only `book` is authoritative
    pub async fn check_availability(
        &self,
        query: CheckAvailabilityQuery,
    ) -> Result<CheckAvailabilityResult, PersistenceError> {
        let same_day = self
            .appointment_repository
            .find_appointments_on_date(query.scheduled_at.date())
            .await
            .map_err(PersistenceError::reading)?;
        let conflict = self.conflict_checker.find_conflict(query.scheduled_at, &same_day);

        Ok(CheckAvailabilityResult {
            scheduled_at: query.scheduled_at,
            available: conflict.is_none(),
            conflicting_appointment_id: conflict.map(|a| a.id),
        })
    }
}
