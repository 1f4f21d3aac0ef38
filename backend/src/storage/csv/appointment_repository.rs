use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use tracing::debug;

use super::connection::{CsvConnection, APPOINTMENTS_HEADER};
use crate::domain::models::appointment::STORAGE_DATETIME_FORMAT;
use crate::domain::models::{Appointment, AppointmentId, NewAppointment, SalonService};
use crate::storage::traits::AppointmentStorage;

/// One line of appointments.csv
#[derive(Debug, Serialize, Deserialize)]
struct AppointmentRecord {
    id: AppointmentId,
    customer_name: String,
    phone_number: String,
    service: String,
    appointment_datetime: String,
}

impl AppointmentRecord {
    fn from_domain(appointment: &Appointment) -> Self {
        Self {
            id: appointment.id,
            customer_name: appointment.customer_name.clone(),
            phone_number: appointment.phone_number.clone(),
            service: appointment.service.label(),
            appointment_datetime: appointment.scheduled_at.format(STORAGE_DATETIME_FORMAT).to_string(),
        }
    }

    fn into_domain(self) -> Result<Appointment> {
        let service = self
            .service
            .parse::<SalonService>()
            .map_err(|e| anyhow!("Corrupt appointment #{}: {}", self.id, e))?;
        let scheduled_at = NaiveDateTime::parse_from_str(&self.appointment_datetime, STORAGE_DATETIME_FORMAT)
            .with_context(|| format!("Corrupt appointment_datetime for #{}", self.id))?;

        Ok(Appointment {
            id: self.id,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            service,
            scheduled_at,
        })
    }
}

/// CSV-based appointment repository
#[derive(Clone)]
pub struct AppointmentRepository {
    connection: CsvConnection,
}

impl AppointmentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every appointment in file order, which is insertion order
    fn read_appointments(&self) -> Result<Vec<Appointment>> {
        self.connection.ensure_appointments_file_exists()?;

        let file_path = self.connection.appointments_file_path();
        let file = File::open(&file_path).with_context(|| format!("Failed to open {}", file_path.display()))?;
        let mut csv_reader = ReaderBuilder::new().from_reader(BufReader::new(file));

        let mut appointments = Vec::new();
        for result in csv_reader.deserialize::<AppointmentRecord>() {
            let record = result.with_context(|| format!("Failed to parse {}", file_path.display()))?;
            appointments.push(record.into_domain()?);
        }

        Ok(appointments)
    }

    /// Replace the file contents through a temp file so readers never see a partial write
    fn write_appointments(&self, appointments: &[Appointment]) -> Result<()> {
        let file_path = self.connection.appointments_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to open {}", temp_path.display()))?;

            let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(file);

            csv_writer.write_record(APPOINTMENTS_HEADER)?;
            for appointment in appointments {
                csv_writer.serialize(AppointmentRecord::from_domain(appointment))?;
            }

            // Data must be on disk before the rename makes it visible
            let file = csv_writer
                .into_inner()
                .map_err(|e| anyhow!("Failed to flush {}: {}", temp_path.display(), e.error()))?;
            file.sync_all()
                .with_context(|| format!("Failed to sync {}", temp_path.display()))?;
        }

        std::fs::rename(&temp_path, &file_path)
            .with_context(|| format!("Failed to replace {}", file_path.display()))?;

        Ok(())
    }
}

#[async_trait]
impl AppointmentStorage for AppointmentRepository {
    async fn insert_appointment(&self, appointment: &NewAppointment) -> Result<AppointmentId> {
        let write_lock = self.connection.write_lock();
        let _guard = write_lock.lock().await;

        let mut appointments = self.read_appointments()?;
        let id = appointments.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        appointments.push(appointment.clone().with_id(id));

        self.write_appointments(&appointments)?;
        debug!("Appended appointment #{} to {}", id, self.connection.appointments_file_path().display());
        Ok(id)
    }

    async fn list_appointments_ordered(&self) -> Result<Vec<Appointment>> {
        let mut appointments = self.read_appointments()?;
        // Stable sort keeps insertion order for equal times
        appointments.sort_by_key(|a| a.scheduled_at);
        Ok(appointments)
    }

    async fn find_appointments_on_date(&self, date: NaiveDate) -> Result<Vec<Appointment>> {
        let appointments: Vec<Appointment> = self
            .read_appointments()?
            .into_iter()
            .filter(|a| a.scheduled_date() == date)
            .collect();

        debug!("Found {} appointments on {}", appointments.len(), date);
        Ok(appointments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use std::fs;

    fn new_appointment(name: &str, day: u32, hour: u32, minute: u32) -> NewAppointment {
        NewAppointment {
            customer_name: name.to_string(),
            phone_number: "555-0000".to_string(),
            service: SalonService::Facial,
            scheduled_at: NaiveDate::from_ymd_opt(2026, 10, day)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_new_connection_writes_header() {
        let env = TestEnvironment::new().await.unwrap();

        let contents = fs::read_to_string(env.connection.appointments_file_path()).unwrap();
        assert_eq!(contents, "id,customer_name,phone_number,service,appointment_datetime\n");
    }

    #[tokio::test]
    async fn test_insert_and_list_in_time_order() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());

        let ten = repo.insert_appointment(&new_appointment("ten", 20, 10, 0)).await.unwrap();
        let nine = repo.insert_appointment(&new_appointment("nine", 20, 9, 0)).await.unwrap();
        let eleven = repo.insert_appointment(&new_appointment("eleven", 20, 11, 0)).await.unwrap();
        assert_eq!((ten, nine, eleven), (1, 2, 3));

        let listed: Vec<(AppointmentId, String)> = repo
            .list_appointments_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|a| (a.id, a.customer_name))
            .collect();
        assert_eq!(
            listed,
            vec![(2, "nine".to_string()), (1, "ten".to_string()), (3, "eleven".to_string())]
        );
    }

    #[tokio::test]
    async fn test_ties_keep_insertion_order() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());

        repo.insert_appointment(&new_appointment("first", 20, 9, 0)).await.unwrap();
        repo.insert_appointment(&new_appointment("second", 20, 9, 0)).await.unwrap();

        let names: Vec<String> = repo
            .list_appointments_ordered()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.customer_name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_find_on_date_filters_other_days() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());

        repo.insert_appointment(&new_appointment("monday", 19, 23, 50)).await.unwrap();
        repo.insert_appointment(&new_appointment("tuesday", 20, 0, 10)).await.unwrap();

        let found = repo
            .find_appointments_on_date(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].customer_name, "tuesday");
    }

    #[tokio::test]
    async fn test_ids_survive_reopening_the_directory() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());
        repo.insert_appointment(&new_appointment("before", 20, 9, 0)).await.unwrap();

        let reopened = AppointmentRepository::new(CsvConnection::new(env.base_directory()).unwrap());
        let id = reopened.insert_appointment(&new_appointment("after", 20, 10, 0)).await.unwrap();

        assert_eq!(id, 2);
        assert_eq!(reopened.list_appointments_ordered().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_names_with_commas_are_quoted() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());

        repo.insert_appointment(&new_appointment("Doe, Jane", 20, 9, 0)).await.unwrap();

        let listed = repo.list_appointments_ordered().await.unwrap();
        assert_eq!(listed[0].customer_name, "Doe, Jane");
        assert_eq!(listed[0].service, SalonService::Facial);
    }

    #[tokio::test]
    async fn test_insert_replaces_file_without_leftovers() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());

        repo.insert_appointment(&new_appointment("Alice", 20, 9, 0)).await.unwrap();

        let contents = fs::read_to_string(env.connection.appointments_file_path()).unwrap();
        assert_eq!(
            contents,
            "id,customer_name,phone_number,service,appointment_datetime\n\
             1,Alice,555-0000,Facial - $50,2026-10-20 09:00:00\n"
        );
        assert!(!env.base_directory().join("appointments.tmp").exists());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let env = TestEnvironment::new().await.unwrap();
        let repo = AppointmentRepository::new(env.connection.clone());
        fs::write(
            env.connection.appointments_file_path(),
            "id,customer_name,phone_number,service,appointment_datetime\n1,A,555,Massage,2026-10-20 09:00:00\n",
        )
        .unwrap();

        assert!(repo.list_appointments_ordered().await.is_err());
        assert!(repo.insert_appointment(&new_appointment("B", 20, 9, 0)).await.is_err());
    }
}
