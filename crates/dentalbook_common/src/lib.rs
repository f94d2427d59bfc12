// --- File: crates/dentalbook_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod http; // HTTP error mapping
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod routes; // Common routes

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

// Re-export error types and utilities for easier access
pub use error::{
    conflict, database_error, not_found, validation_error, AppError,
    HttpStatusCode,
};

pub use http::map_json_error;

pub use logging::{init_with_config, init_with_level, log_error, log_result};

pub use models::{Appointment, AppointmentFilter, NewAppointment};
