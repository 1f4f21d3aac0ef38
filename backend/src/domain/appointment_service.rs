//! Read side of the appointment book.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::appointments::{AppointmentListQuery, AppointmentListResult};
use crate::storage::AppointmentStorage;

#[derive(Clone)]
pub struct AppointmentService {
    appointment_repository: Arc<dyn AppointmentStorage>,
}

impl AppointmentService {
    pub fn new(appointment_repository: Arc<dyn AppointmentStorage>) -> Self {
        Self { appointment_repository }
    }

    /// Snapshot of the book ordered by time, optionally narrowed to one day
    pub async fn list_appointments(&self, query: AppointmentListQuery) -> Result<AppointmentListResult> {
        let appointments = match query.date {
            Some(date) => {
                let mut on_date = self.appointment_repository.find_appointments_on_date(date).await?;
                on_date.sort_by_key(|a| (a.scheduled_at, a.id));
                on_date
            }
            None => self.appointment_repository.list_appointments_ordered().await?,
        };

        info!("Listing {} appointments (date filter: {:?})", appointments.len(), query.date);
        Ok(AppointmentListResult { appointments })
    }
}
