// --- File: crates/services/dentalbook_backend/src/app_state.rs ---
use dentalbook_common::log_result;
use dentalbook_config::AppConfig;
use dentalbook_db::{AppointmentRepository, DbClient, DbError, SqlAppointmentRepository};
use std::sync::Arc;
use tracing::debug;

/// Application state that is shared across all routes.
///
/// Holds the loaded configuration and the store's connection pool. The schema
/// is created while the state is built, so a constructed `AppState` is always
/// ready to serve requests.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration loaded at startup.
    pub config: Arc<AppConfig>,

    /// Connection pool shared by every repository.
    pub db_client: DbClient,
}

impl AppState {
    /// Connect to the configured store and create the appointment schema.
    pub async fn new(config: Arc<AppConfig>) -> Result<Self, DbError> {
        let db_client = log_result(
            DbClient::new(&config).await,
            "Database connection established",
            "Failed to connect to the database",
        )?;

        Self::with_client(config, db_client).await
    }

    /// Build the state around an existing client, creating the schema if needed.
    pub async fn with_client(config: Arc<AppConfig>, db_client: DbClient) -> Result<Self, DbError> {
        debug!("Preparing store behind {}", db_client);

        log_result(
            SqlAppointmentRepository::new(db_client.clone())
                .init_schema()
                .await,
            "Appointment schema ready",
            "Failed to create the appointment schema",
        )?;

        Ok(Self { config, db_client })
    }

    /// A repository over the shared pool.
    pub fn appointment_repository(&self) -> SqlAppointmentRepository {
        SqlAppointmentRepository::new(self.db_client.clone())
    }
}
