//! Repository modules for database access

pub mod appointment;
pub mod appointment_sql;

// Re-export the appointment repository for ease of use
pub use appointment::{Appointment, AppointmentFilter, AppointmentRepository, NewAppointment};
pub use appointment_sql::SqlAppointmentRepository;
