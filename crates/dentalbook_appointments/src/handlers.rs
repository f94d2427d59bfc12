// --- File: crates/dentalbook_appointments/src/handlers.rs ---

//! HTTP handlers for the appointment endpoints.
//!
//! Each request borrows a pooled connection through the repository for the
//! duration of the call only. Extractor rejections are turned into
//! validation errors before any store access.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use dentalbook_common::{map_json_error, AppError};
use dentalbook_db::{Appointment, SqlAppointmentRepository};
use std::sync::Arc;
use tracing::debug;

use crate::logic::{
    book_appointment, cancel_appointment, list_appointments, CreateAppointmentRequest,
    ListAppointmentsQuery,
};

/// Shared state for appointment handlers
#[derive(Clone)]
pub struct AppointmentState {
    pub repository: SqlAppointmentRepository,
}

/// Handler to book an appointment.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/appointments/",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment booked", body = Appointment),
        (status = 400, description = "Time slot already booked",
         example = json!({"detail": "Time slot already booked!"})),
        (status = 422, description = "Missing or invalid fields"),
        (status = 500, description = "Store failure")
    ),
    tag = "Appointments"
))]
pub async fn create_appointment_handler(
    State(state): State<Arc<AppointmentState>>,
    payload: Result<Json<CreateAppointmentRequest>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Json(request) = payload?;
    debug!("Booking request for dentist: {}", request.dentist_name);
    map_json_error(
        book_appointment(&state.repository, request).await,
        AppError::from,
    )
}

/// Handler to list appointments, optionally filtered by date and dentist.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/appointments/",
    params(ListAppointmentsQuery),
    responses(
        (status = 200, description = "Matching appointments, possibly none", body = [Appointment]),
        (status = 422, description = "Unparsable query parameters"),
        (status = 500, description = "Store failure")
    ),
    tag = "Appointments"
))]
pub async fn list_appointments_handler(
    State(state): State<Arc<AppointmentState>>,
    query: Result<Query<ListAppointmentsQuery>, QueryRejection>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let Query(query) = query?;
    map_json_error(
        list_appointments(&state.repository, query).await,
        AppError::from,
    )
}

/// Handler to cancel an appointment.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    delete,
    path = "/appointments/{appointment_id}",
    params(
        ("appointment_id" = i64, Path, description = "ID of the appointment to cancel")
    ),
    responses(
        (status = 200, description = "Appointment canceled", body = Appointment),
        (status = 404, description = "No such appointment",
         example = json!({"detail": "Appointment not found"})),
        (status = 422, description = "Non-integer ID"),
        (status = 500, description = "Store failure")
    ),
    tag = "Appointments"
))]
pub async fn cancel_appointment_handler(
    State(state): State<Arc<AppointmentState>>,
    appointment_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Path(appointment_id) = appointment_id?;
    map_json_error(
        cancel_appointment(&state.repository, appointment_id).await,
        AppError::from,
    )
}
