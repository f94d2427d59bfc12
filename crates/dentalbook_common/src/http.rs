// --- File: crates/dentalbook_common/src/http.rs ---
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::error::{validation_error, AppError, HttpStatusCode};

/// Implement IntoResponse for AppError so handlers can return `Result<_, AppError>`.
///
/// The body is `{"detail": "<message>"}`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status_code.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({ "detail": self.detail() }));
        (status_code, body).into_response()
    }
}

// Extractor rejections are input validation failures.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        validation_error(rejection.body_text())
    }
}

/// Maps a domain-specific error into an `AppError` and wraps the success value in `Json`.
pub fn map_json_error<T, E, F>(result: Result<T, E>, f: F) -> Result<Json<T>, AppError>
where
    T: serde::Serialize,
    F: FnOnce(E) -> AppError,
{
    result.map(Json).map_err(f)
}
