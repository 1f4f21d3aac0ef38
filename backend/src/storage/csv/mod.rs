//! # CSV Storage Module
//!
//! Flat-file appointment book: a single `appointments.csv` in the data
//! directory, rewritten atomically on every insert.
//!
//! ```text
//! salon_data/
//! └── appointments.csv   id,customer_name,phone_number,service,appointment_datetime
//! ```

pub mod appointment_repository;
pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use appointment_repository::AppointmentRepository as CsvAppointmentRepository;
pub use connection::CsvConnection;
