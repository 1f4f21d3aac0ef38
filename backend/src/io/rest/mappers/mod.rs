pub mod appointment_mapper;
