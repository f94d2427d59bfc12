// --- File: crates/dentalbook_common/src/models.rs ---

// Data structures shared by the persistence and request layers.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A persisted dental appointment.
///
/// `appointment_date` carries no time zone and is kept at one-second precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Appointment {
    /// Store-assigned identifier
    #[cfg_attr(feature = "openapi", schema(example = 1))]
    pub id: i64,

    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub patient_name: String,

    #[cfg_attr(feature = "openapi", schema(example = "Dr. Smith"))]
    pub dentist_name: String,

    /// ISO-8601 timestamp without offset, e.g. `2024-12-06T10:00:00`
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, format = DateTime, example = "2024-12-06T10:00:00")
    )]
    pub appointment_date: NaiveDateTime,

    /// Set once by cancellation, never cleared
    pub is_canceled: bool,
}

/// An appointment that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAppointment {
    pub patient_name: String,
    pub dentist_name: String,
    pub appointment_date: NaiveDateTime,
}

impl NewAppointment {
    /// Create a new appointment, truncating the timestamp to whole seconds.
    pub fn new(patient_name: String, dentist_name: String, appointment_date: NaiveDateTime) -> Self {
        Self {
            patient_name,
            dentist_name,
            appointment_date: truncate_to_seconds(appointment_date),
        }
    }
}

/// Optional filters for listing appointments. Present filters are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub date: Option<NaiveDateTime>,
    pub dentist_name: Option<String>,
}

impl AppointmentFilter {
    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.dentist_name.is_none()
    }
}

/// Drops sub-second precision so that slot comparison is exact to the second.
pub fn truncate_to_seconds(value: NaiveDateTime) -> NaiveDateTime {
    value.with_nanosecond(0).unwrap_or(value)
}
