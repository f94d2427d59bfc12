// --- File: crates/dentalbook_appointments/src/logic.rs ---

//! Booking rules.
//!
//! A slot (dentist + exact timestamp) can be booked once. Canceled
//! appointments keep their slot. Cancellation is a one-way flag and may be
//! repeated.

use chrono::NaiveDateTime;
use dentalbook_common::models::truncate_to_seconds;
use dentalbook_db::{
    Appointment, AppointmentFilter, AppointmentRepository, DbError, NewAppointment,
};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::error::AppointmentError;

/// Timestamp layouts accepted from clients, tried in order. `%.f` also
/// matches when there is no fractional part.
const INPUT_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parses a client-supplied ISO-8601 timestamp without offset. A space may
/// stand in for the `T` and seconds may be omitted.
pub fn parse_input_timestamp(raw: &str) -> Option<NaiveDateTime> {
    INPUT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}

fn timestamp_from_str<E: serde::de::Error>(raw: &str) -> Result<NaiveDateTime, E> {
    parse_input_timestamp(raw).ok_or_else(|| {
        E::custom(format!(
            "invalid datetime '{raw}', expected YYYY-MM-DDTHH:MM[:SS[.ffffff]]"
        ))
    })
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    timestamp_from_str(&raw)
}

fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)?
        .map(|raw| timestamp_from_str(&raw))
        .transpose()
}

/// Request body for creating an appointment.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateAppointmentRequest {
    #[cfg_attr(feature = "openapi", schema(example = "John Doe"))]
    pub patient_name: String,

    #[cfg_attr(feature = "openapi", schema(example = "Dr. Smith"))]
    pub dentist_name: String,

    /// ISO-8601 timestamp without offset; fractional seconds are dropped
    #[cfg_attr(
        feature = "openapi",
        schema(value_type = String, format = DateTime, example = "2024-12-06T10:00:00")
    )]
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub appointment_date: NaiveDateTime,
}

/// Query parameters for listing appointments.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ListAppointmentsQuery {
    /// Only appointments at exactly this timestamp
    #[cfg_attr(
        feature = "openapi",
        param(value_type = Option<String>, format = DateTime, example = "2024-12-06T10:00:00")
    )]
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub date: Option<NaiveDateTime>,

    /// Only appointments with this dentist
    pub dentist_name: Option<String>,
}

impl ListAppointmentsQuery {
    /// An empty `dentist_name` does not filter.
    pub fn into_filter(self) -> AppointmentFilter {
        AppointmentFilter {
            date: self.date.map(truncate_to_seconds),
            dentist_name: self.dentist_name.filter(|name| !name.is_empty()),
        }
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppointmentError> {
    if value.trim().is_empty() {
        return Err(AppointmentError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Checks the request shape and turns it into an unsaved appointment.
pub fn validate_request(
    request: CreateAppointmentRequest,
) -> Result<NewAppointment, AppointmentError> {
    require_text("patient_name", &request.patient_name)?;
    require_text("dentist_name", &request.dentist_name)?;

    Ok(NewAppointment::new(
        request.patient_name,
        request.dentist_name,
        request.appointment_date,
    ))
}

/// Books an appointment unless its slot is already taken.
///
/// The lookup gives the common case a clean error; the store's unique slot
/// index settles concurrent bookings, and its violation is reported the same way.
pub async fn book_appointment<R>(
    repository: &R,
    request: CreateAppointmentRequest,
) -> Result<Appointment, AppointmentError>
where
    R: AppointmentRepository + Sync,
{
    let new_appointment = validate_request(request)?;

    if let Some(existing) = repository
        .find_by_slot(&new_appointment.dentist_name, new_appointment.appointment_date)
        .await?
    {
        debug!(
            "Slot for {} at {} already held by appointment {}",
            new_appointment.dentist_name, new_appointment.appointment_date, existing.id
        );
        return Err(AppointmentError::SlotTaken);
    }

    match repository.create(new_appointment).await {
        Ok(appointment) => {
            info!(
                "Booked appointment {} with {} at {}",
                appointment.id, appointment.dentist_name, appointment.appointment_date
            );
            Ok(appointment)
        }
        Err(DbError::UniqueViolation(_)) => Err(AppointmentError::SlotTaken),
        Err(err) => Err(err.into()),
    }
}

/// Lists appointments matching the query. Never fails on an empty result.
pub async fn list_appointments<R>(
    repository: &R,
    query: ListAppointmentsQuery,
) -> Result<Vec<Appointment>, AppointmentError>
where
    R: AppointmentRepository + Sync,
{
    let filter = query.into_filter();
    let appointments = repository.list(&filter).await?;
    debug!("Found {} appointments", appointments.len());
    Ok(appointments)
}

/// Cancels an appointment. Canceling twice is accepted.
pub async fn cancel_appointment<R>(
    repository: &R,
    appointment_id: i64,
) -> Result<Appointment, AppointmentError>
where
    R: AppointmentRepository + Sync,
{
    let appointment = repository
        .cancel(appointment_id)
        .await?
        .ok_or(AppointmentError::NotFound)?;

    info!("Canceled appointment {}", appointment.id);
    Ok(appointment)
}
