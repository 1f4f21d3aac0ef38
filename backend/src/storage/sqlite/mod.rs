//! # SQLite Storage Module
//!
//! SQLite rendition of the `appointments` table, accessed through sqlx.
//!
//! - **connection.rs** - pool management and schema bootstrap
//! - **appointment_repository.rs** - `AppointmentStorage` over the pool

pub mod appointment_repository;
pub mod connection;

pub use appointment_repository::AppointmentRepository as SqliteAppointmentRepository;
pub use connection::DbConnection;
