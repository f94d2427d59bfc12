use std::fmt;
use thiserror::Error;

/// The service-wide error type.
///
/// Each crate converts its own error enum into `AppError` with a `From` impl,
/// and handlers return `Result<_, AppError>` so that the HTTP mapping lives in
/// one place.
#[derive(Error, Debug)]
pub enum AppError {
    /// Malformed or missing request input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested slot is already taken
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// The referenced resource does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The store failed or is unreachable
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AppError {
    /// The client-facing message, without the category prefix used by `Display`.
    ///
    /// Server-side failures are reported generically; their details only go to the log.
    pub fn detail(&self) -> String {
        match self {
            AppError::ValidationError(message)
            | AppError::ConflictError(message)
            | AppError::NotFoundError(message) => message.clone(),
            AppError::DatabaseError(_) => "Internal Server Error".to_string(),
        }
    }
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AppError {
    fn status_code(&self) -> u16 {
        match self {
            AppError::ValidationError(_) => 422,
            // Double-booking is reported as 400 Bad Request, which existing clients expect.
            AppError::ConflictError(_) => 400,
            AppError::NotFoundError(_) => 404,
            AppError::DatabaseError(_) => 500,
        }
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> AppError {
    AppError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AppError {
    AppError::NotFoundError(message.to_string())
}

pub fn conflict<T: fmt::Display>(message: T) -> AppError {
    AppError::ConflictError(message.to_string())
}

pub fn database_error<T: fmt::Display>(message: T) -> AppError {
    AppError::DatabaseError(message.to_string())
}
