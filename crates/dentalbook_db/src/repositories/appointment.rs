//! Repository for appointments
//!
//! This module defines the storage interface for appointment records. The
//! request layer only talks to this trait; the SQL implementation lives in
//! [`crate::repositories::appointment_sql`].

use crate::error::DbError;
use chrono::NaiveDateTime;

// Re-export the models from dentalbook_common for convenience
pub use dentalbook_common::models::{Appointment, AppointmentFilter, NewAppointment};

/// Storage operations for appointments
pub trait AppointmentRepository {
    /// Create the appointments table and its slot index if they don't exist.
    ///
    /// Idempotent; called once at startup.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Find the appointment occupying a slot, canceled or not.
    ///
    /// Dentist name and timestamp must match exactly.
    fn find_by_slot(
        &self,
        dentist_name: &str,
        appointment_date: NaiveDateTime,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, DbError>> + Send;

    /// Insert a new, non-canceled appointment and return it with its assigned ID.
    ///
    /// Returns [`DbError::UniqueViolation`] when the slot is already stored.
    fn create(
        &self,
        appointment: NewAppointment,
    ) -> impl std::future::Future<Output = Result<Appointment, DbError>> + Send;

    /// Find an appointment by ID
    fn find_by_id(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, DbError>> + Send;

    /// List appointments matching every filter that is set, ordered by ID
    fn list(
        &self,
        filter: &AppointmentFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Appointment>, DbError>> + Send;

    /// Mark an appointment as canceled and return the updated record.
    ///
    /// Returns `None` when no appointment has this ID. Canceling an appointment
    /// that is already canceled succeeds and returns it unchanged.
    fn cancel(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<Option<Appointment>, DbError>> + Send;
}
