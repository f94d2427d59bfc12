// --- File: crates/services/dentalbook_backend/src/lib.rs ---
pub mod app_state;
pub mod health;

use axum::{routing::get, Router};
use dentalbook_appointments::routes as appointment_routes;
use dentalbook_common::routes as common_routes;
use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing::info;

use crate::app_state::AppState;
use crate::health::health_handler;

/// Favicon served when `server.favicon_path` is not configured
const DEFAULT_FAVICON_PATH: &str = "favicon.ico";

/// Assemble the full application router.
pub fn app(state: &AppState) -> Router {
    let favicon_path = state
        .config
        .server
        .favicon_path
        .clone()
        .unwrap_or_else(|| DEFAULT_FAVICON_PATH.to_string());

    let health_router = Router::new()
        .route("/health", get(health_handler))
        .with_state(state.clone());

    #[allow(unused_mut)] // mutated when the openapi feature is enabled
    let mut app = Router::new()
        .merge(common_routes::routes())
        .merge(appointment_routes::routes(state.appointment_repository()))
        .merge(health_router)
        .route_service("/favicon.ico", ServeFile::new(favicon_path));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use dentalbook_appointments::doc::AppointmentApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Dental Appointment API",
                version = "0.1.0",
                description = "Book, list and cancel dental appointments"
            ),
            paths(
                dentalbook_common::routes::root_handler,
                crate::health::health_handler,
            ),
            components(schemas(
                dentalbook_common::routes::WelcomeResponse,
                crate::health::HealthResponse
            )),
            tags((name = "Common", description = "Service status endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(AppointmentApiDoc::openapi());
        info!("Adding Swagger UI at /docs");

        let swagger_ui = SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    info!("Application router assembled");
    app.layer(TraceLayer::new_for_http())
}
