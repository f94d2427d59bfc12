// --- File: crates/dentalbook_common/src/routes.rs ---

// Routes that do not depend on any feature crate.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// Fixed greeting returned by the root route.
pub const WELCOME_MESSAGE: &str = "Welcome to the Appointment Management System";

/// Body of the root route.
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct WelcomeResponse {
    pub message: String,
}

/// Root handler. Used as a liveness probe; it never touches the store.
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = WelcomeResponse,
         example = json!({"message": "Welcome to the Appointment Management System"}))
    ),
    tag = "Common"
))]
pub async fn root_handler() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: WELCOME_MESSAGE.to_string(),
    })
}

/// Creates a router containing the common routes.
///
/// `GET /` also answers `HEAD /`.
pub fn routes() -> Router {
    Router::new().route("/", get(root_handler))
}
