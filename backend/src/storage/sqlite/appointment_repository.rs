use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::debug;

use super::connection::DbConnection;
use crate::domain::models::appointment::STORAGE_DATETIME_FORMAT;
use crate::domain::models::{Appointment, AppointmentId, NewAppointment, SalonService};
use crate::storage::traits::AppointmentStorage;

/// Repository for appointment rows in SQLite
#[derive(Clone)]
pub struct AppointmentRepository {
    db: DbConnection,
}

impl AppointmentRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> Result<Appointment> {
        let service_label: String = row.try_get("service")?;
        let stored_at: String = row.try_get("appointment_datetime")?;

        Ok(Appointment {
            id: row.try_get("id")?,
            customer_name: row.try_get("customer_name")?,
            phone_number: row.try_get("phone_number")?,
            service: service_label
                .parse::<SalonService>()
                .map_err(|e| anyhow!("Corrupt appointment row: {}", e))?,
            scheduled_at: NaiveDateTime::parse_from_str(&stored_at, STORAGE_DATETIME_FORMAT)
                .with_context(|| format!("Corrupt appointment_datetime '{}'", stored_at))?,
        })
    }
}

#[async_trait]
impl AppointmentStorage for AppointmentRepository {
    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<AppointmentId> {
        let result = sqlx::query(
            r#"
            INSERT INTO appointments (customer_name, phone_number, service, appointment_datetime)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&appointment.customer_name)
        .bind(&appointment.phone_number)
        .bind(appointment.service.label())
        .bind(appointment.scheduled_at.format(STORAGE_DATETIME_FORMAT).to_string())
        .execute(self.db.pool())
        .await
        .context("Failed to insert appointment")?;

        let id = result.last_insert_rowid();
        debug!("Inserted appointment #{}", id);
        Ok(id)
    }

    async fn list_appointments_ordered(&self) -> Result<Vec<Appointment>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, phone_number, service, appointment_datetime
            FROM appointments
            ORDER BY appointment_datetime ASC, id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await
        .context("Failed to list appointments")?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn find_appointments_on_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        // Inclusive range over the fixed-width text form; times carry whole seconds
        let day_start = date.and_hms_opt(0, 0, 0).ok_or_else(|| anyhow!("Invalid date {}", date))?;
        let day_end = date.and_hms_opt(23, 59, 59).ok_or_else(|| anyhow!("Invalid date {}", date))?;

        let rows = sqlx::query(
            r#"
            SELECT id, customer_name, phone_number, service, appointment_datetime
            FROM appointments
            WHERE appointment_datetime >= ? AND appointment_datetime <= ?
            "#,
        )
        .bind(day_start.format(STORAGE_DATETIME_FORMAT).to_string())
        .bind(day_end.format(STORAGE_DATETIME_FORMAT).to_string())
        .fetch_all(self.db.pool())
        .await
        .with_context(|| format!("Failed to query appointments on {}", date))?;

        debug!("Found {} appointments on {}", rows.len(), date);
        rows.iter().map(Self::map_row).collect()
    }
}
