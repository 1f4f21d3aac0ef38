//! # Domain Module
//!
//! Business logic for the salon's appointment book, independent of any UI
//! or storage backend.
//!
//! ## Module Organization
//!
//! - **booking_service**: validates and books appointments
//! - **conflict_checker**: the minimum-separation rule between same-day appointments
//! - **date_locks**: per-date serialization of the booking read-check-write sequence
//! - **appointment_service**: ordered listing and per-day lookups
//! - **appointment_table**: formatting for the listing view
//! - **clock**: local wall-clock source
//! - **commands**: internal command/query types
//! - **models**: appointments, the service catalog and booking errors
//!
//! ## Business Rules
//!
//! - Customer name and phone number must not be blank
//! - The service must come from the fixed catalog
//! - Appointments must be strictly in the future when booked
//! - Two appointments on the same calendar date must be at least the conflict window apart
//! - The book is append-only

pub mod appointment_service;
pub mod appointment_table;
pub mod booking_service;
pub mod clock;
pub mod commands;
pub mod conflict_checker;
pub mod date_locks;
pub mod models;

pub use appointment_service::AppointmentService;
pub use appointment_table::AppointmentTableService;
pub use booking_service::BookingService;
pub use clock::{Clock, FixedClock, SystemClock};
pub use conflict_checker::ConflictChecker;
