// --- File: crates/dentalbook_appointments/src/error.rs ---
use dentalbook_common::{conflict, database_error, not_found, validation_error, AppError};
use dentalbook_db::DbError;
use thiserror::Error;

/// Message returned when a slot is taken. Clients match on it.
pub const SLOT_TAKEN_MESSAGE: &str = "Time slot already booked!";

/// Message returned when an appointment ID is unknown.
pub const NOT_FOUND_MESSAGE: &str = "Appointment not found";

/// Appointment-specific error types.
#[derive(Error, Debug)]
pub enum AppointmentError {
    /// Request input failed validation
    #[error("{0}")]
    Validation(String),

    /// Another appointment already holds this dentist and time
    #[error("Time slot already booked!")]
    SlotTaken,

    /// No appointment with the requested ID
    #[error("Appointment not found")]
    NotFound,

    /// The store failed
    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::Validation(message) => validation_error(message),
            AppointmentError::SlotTaken => conflict(SLOT_TAKEN_MESSAGE),
            AppointmentError::NotFound => not_found(NOT_FOUND_MESSAGE),
            AppointmentError::Store(db_err) => database_error(db_err),
        }
    }
}
