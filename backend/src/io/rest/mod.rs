//! # REST API Interface Layer
//!
//! HTTP endpoints for the salon booking backend. Handlers translate JSON
//! DTOs from the `shared` crate into domain commands and map domain errors
//! onto status codes:
//!
//! - validation failures -> `400 Bad Request`
//! - slot conflicts -> `409 Conflict`
//! - storage failures -> `500 Internal Server Error`
//!
//! Every error body is a `BookingErrorResponse` (`kind`, optional `field`, `message`).

pub mod appointment_apis;
pub mod mappers;
pub mod service_catalog_apis;

pub use appointment_apis::{check_availability, create_appointment, get_appointment_table, list_appointments};
pub use service_catalog_apis::list_services;
