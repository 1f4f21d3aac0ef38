pub mod appointment;
pub mod booking;
pub mod service;

pub use appointment::{Appointment, AppointmentId, NewAppointment};
pub use booking::{BookingError, PersistenceError, ValidationField};
pub use service::SalonService;
