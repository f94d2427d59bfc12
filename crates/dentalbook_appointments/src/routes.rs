// --- File: crates/dentalbook_appointments/src/routes.rs ---

use axum::{
    routing::{delete, post},
    Router,
};
use dentalbook_db::SqlAppointmentRepository;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    cancel_appointment_handler, create_appointment_handler, list_appointments_handler,
    AppointmentState,
};

/// Creates a router containing all appointment routes.
///
/// The collection is served both with and without the trailing slash.
pub fn routes(repository: SqlAppointmentRepository) -> Router {
    let state = Arc::new(AppointmentState { repository });

    info!("Appointment routes initialized");

    Router::new()
        .route(
            "/appointments/",
            post(create_appointment_handler).get(list_appointments_handler),
        )
        .route(
            "/appointments",
            post(create_appointment_handler).get(list_appointments_handler),
        )
        .route(
            "/appointments/{appointment_id}",
            delete(cancel_appointment_handler),
        )
        .with_state(state)
}
