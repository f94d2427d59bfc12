// --- File: crates/dentalbook_appointments/src/doc.rs ---

#![cfg(feature = "openapi")]
use dentalbook_common::Appointment;
use utoipa::OpenApi;

use crate::logic::CreateAppointmentRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_appointment_handler,
        crate::handlers::list_appointments_handler,
        crate::handlers::cancel_appointment_handler,
    ),
    components(schemas(Appointment, CreateAppointmentRequest)),
    tags(
        (name = "Appointments", description = "Book, list and cancel dental appointments")
    )
)]
pub struct AppointmentApiDoc;
