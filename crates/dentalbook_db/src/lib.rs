//! Database integration for the appointment service
//!
//! This crate provides a database client that is designed to be database agnostic,
//! using SQLx's `Any` driver, and the appointment repository built on top of it.
//! SQLite is enabled by default; PostgreSQL is available through the `postgres`
//! feature.
//!
//! # Example
//!
//! ```rust,no_run
//! use dentalbook_db::{AppointmentRepository, DbClient, SqlAppointmentRepository};
//!
//! async fn setup_db() -> Result<SqlAppointmentRepository, Box<dyn std::error::Error>> {
//!     let db_client = DbClient::from_url("sqlite://data/appointments.db").await?;
//!     let repository = SqlAppointmentRepository::new(db_client);
//!     repository.init_schema().await?;
//!     Ok(repository)
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;

// Re-export the client and error for ease of use
pub use client::{DbBackend, DbClient, DbTransaction};
pub use error::DbError;

// Re-export the repositories module components for ease of use
pub use repositories::{
    Appointment, AppointmentFilter, AppointmentRepository, NewAppointment,
    SqlAppointmentRepository,
};
