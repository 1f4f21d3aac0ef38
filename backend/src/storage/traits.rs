//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. Any backend that honours
//! these contracts can hold the appointment book.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::models::{Appointment, AppointmentId, NewAppointment};

/// Append-only appointment store
///
/// Implementations own the appointment collection. Callers only ever receive
/// owned snapshots, never references into the store.
#[async_trait]
pub trait AppointmentStorage: Send + Sync {
    /// Persist a new appointment and return the id assigned to it.
    /// The record must be durable before this returns `Ok`.
    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<AppointmentId>;

    /// All appointments ordered by scheduled time ascending,
    /// ties broken by insertion order
    async fn list_appointments_ordered(&self) -> Result<Vec<Appointment>>;

    /// All appointments scheduled on the given calendar date, in no particular order
    async fn find_appointments_on_date(&self, date: NaiveDate) -> Result<Vec<Appointment>>;
}

/// Factory for repositories on top of a concrete connection
pub trait Connection: Send + Sync + Clone {
    type AppointmentRepository: AppointmentStorage + 'static;

    fn create_appointment_repository(&self) -> Self::AppointmentRepository;
}
