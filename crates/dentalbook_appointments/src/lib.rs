// --- File: crates/dentalbook_appointments/src/lib.rs ---
// Declare modules within this crate
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;

// Re-export the routes function to be used by the main backend service
pub use routes::routes;

pub use error::{AppointmentError, NOT_FOUND_MESSAGE, SLOT_TAKEN_MESSAGE};
