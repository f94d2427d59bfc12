//! SQL implementation of the appointment repository
//!
//! Timestamps cross the `sqlx::Any` boundary as canonical `YYYY-MM-DDTHH:MM:SS`
//! text. SQLite stores that text directly. PostgreSQL keeps a real `TIMESTAMP`
//! column and converts on the way in (`CAST($n AS TIMESTAMP)`) and on the way
//! out (`to_char`).

use crate::client::DbBackend;
use crate::error::DbError;
use crate::repositories::appointment::{
    Appointment, AppointmentFilter, AppointmentRepository, NewAppointment,
};
use crate::DbClient;
use chrono::NaiveDateTime;
use sqlx::any::AnyRow;
use sqlx::Row;
use tracing::{debug, error, info};

/// Storage format of `appointment_date`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Format also accepted when reading rows written by other tools
const TIMESTAMP_FORMAT_SPACED: &str = "%Y-%m-%d %H:%M:%S";

const SQLITE_COLUMNS: &str = "id, patient_name, dentist_name, appointment_date, is_canceled";

const POSTGRES_COLUMNS: &str = "CAST(id AS BIGINT) AS id, patient_name, dentist_name, \
     to_char(appointment_date, 'YYYY-MM-DD\"T\"HH24:MI:SS') AS appointment_date, is_canceled";

const SQLITE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        patient_name TEXT NOT NULL,
        dentist_name TEXT NOT NULL,
        appointment_date TEXT NOT NULL,
        is_canceled INTEGER NOT NULL DEFAULT 0
    )
"#;

const POSTGRES_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS appointments (
        id BIGSERIAL PRIMARY KEY,
        patient_name TEXT NOT NULL,
        dentist_name TEXT NOT NULL,
        appointment_date TIMESTAMP NOT NULL,
        is_canceled BOOLEAN NOT NULL DEFAULT FALSE
    )
"#;

// The check-then-insert in the request layer is not atomic; this index is what
// actually keeps a slot single-booked under concurrent requests.
const SLOT_INDEX: &str = r#"
    CREATE UNIQUE INDEX IF NOT EXISTS ux_appointments_slot
    ON appointments (dentist_name, appointment_date)
"#;

/// SQL implementation of the appointment repository
#[derive(Debug, Clone)]
pub struct SqlAppointmentRepository {
    /// The database client
    db_client: DbClient,
}

impl SqlAppointmentRepository {
    /// Create a new SQL appointment repository
    pub fn new(db_client: DbClient) -> Self {
        Self { db_client }
    }

    /// The underlying database client
    pub fn db_client(&self) -> &DbClient {
        &self.db_client
    }
}

pub(crate) fn format_timestamp(value: NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, DbError> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT_SPACED))
        .map_err(|e| DbError::DecodeError(format!("invalid appointment_date '{}': {}", raw, e)))
}

/// Columns read back for every appointment row.
fn select_columns(backend: DbBackend) -> &'static str {
    match backend {
        DbBackend::Sqlite => SQLITE_COLUMNS,
        DbBackend::Postgres => POSTGRES_COLUMNS,
    }
}

/// Placeholder for a bound `appointment_date` value.
fn timestamp_param(backend: DbBackend, index: usize) -> String {
    match backend {
        DbBackend::Sqlite => format!("${index}"),
        DbBackend::Postgres => format!("CAST(${index} AS TIMESTAMP)"),
    }
}

fn decode_error(column: &str, err: sqlx::Error) -> DbError {
    DbError::DecodeError(format!("column {}: {}", column, err))
}

/// Map a row to an appointment.
///
/// `is_canceled` is a native boolean on PostgreSQL but an integer column on
/// SQLite, whose `BOOLEAN` type the `Any` driver cannot decode at all.
fn appointment_from_row(row: &AnyRow) -> Result<Appointment, DbError> {
    let raw_date: String = row
        .try_get("appointment_date")
        .map_err(|e| decode_error("appointment_date", e))?;

    let is_canceled = match row.try_get::<bool, _>("is_canceled") {
        Ok(flag) => flag,
        Err(_) => row
            .try_get::<i64, _>("is_canceled")
            .map(|flag| flag != 0)
            .map_err(|e| decode_error("is_canceled", e))?,
    };

    Ok(Appointment {
        id: row.try_get("id").map_err(|e| decode_error("id", e))?,
        patient_name: row
            .try_get("patient_name")
            .map_err(|e| decode_error("patient_name", e))?,
        dentist_name: row
            .try_get("dentist_name")
            .map_err(|e| decode_error("dentist_name", e))?,
        appointment_date: parse_timestamp(&raw_date)?,
        is_canceled,
    })
}

async fn fetch_by_id<'e, E>(
    executor: E,
    backend: DbBackend,
    id: i64,
) -> Result<Option<Appointment>, DbError>
where
    E: sqlx::Executor<'e, Database = sqlx::Any>,
{
    let query = format!(
        "SELECT {} FROM appointments WHERE id = $1",
        select_columns(backend)
    );

    let row = sqlx::query(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            error!("Failed to find appointment {}: {}", id, e);
            DbError::from_query(e)
        })?;

    row.as_ref().map(appointment_from_row).transpose()
}

/// Build the listing query. Placeholders are numbered in the order the
/// filters are bound: date first, then dentist.
fn list_query(filter: &AppointmentFilter, backend: DbBackend) -> String {
    let mut clauses = Vec::new();
    if filter.date.is_some() {
        clauses.push(format!(
            "appointment_date = {}",
            timestamp_param(backend, clauses.len() + 1)
        ));
    }
    if filter.dentist_name.is_some() {
        clauses.push(format!("dentist_name = ${}", clauses.len() + 1));
    }

    let mut query = format!("SELECT {} FROM appointments", select_columns(backend));
    if !clauses.is_empty() {
        query.push_str(" WHERE ");
        query.push_str(&clauses.join(" AND "));
    }
    query.push_str(" ORDER BY id");
    query
}

impl AppointmentRepository for SqlAppointmentRepository {
    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing appointment schema");

        let table = match self.db_client.backend() {
            DbBackend::Sqlite => SQLITE_SCHEMA,
            DbBackend::Postgres => POSTGRES_SCHEMA,
        };
        self.db_client.execute(table).await?;
        self.db_client.execute(SLOT_INDEX).await?;

        info!("Appointment schema initialized successfully");
        Ok(())
    }

    async fn find_by_slot(
        &self,
        dentist_name: &str,
        appointment_date: NaiveDateTime,
    ) -> Result<Option<Appointment>, DbError> {
        debug!(
            "Looking up slot for dentist: {} at {}",
            dentist_name, appointment_date
        );

        let backend = self.db_client.backend();
        let query = format!(
            "SELECT {} FROM appointments WHERE dentist_name = $1 AND appointment_date = {} LIMIT 1",
            select_columns(backend),
            timestamp_param(backend, 2)
        );

        let row = sqlx::query(&query)
            .bind(dentist_name)
            .bind(format_timestamp(appointment_date))
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to look up appointment slot: {}", e);
                DbError::from_query(e)
            })?;

        row.as_ref().map(appointment_from_row).transpose()
    }

    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, DbError> {
        debug!(
            "Creating appointment for patient: {} with dentist: {}",
            appointment.patient_name, appointment.dentist_name
        );

        let backend = self.db_client.backend();
        let query = format!(
            "INSERT INTO appointments (patient_name, dentist_name, appointment_date, is_canceled) \
             VALUES ($1, $2, {}, $4) RETURNING {}",
            timestamp_param(backend, 3),
            select_columns(backend)
        );

        let row = sqlx::query(&query)
            .bind(&appointment.patient_name)
            .bind(&appointment.dentist_name)
            .bind(format_timestamp(appointment.appointment_date))
            .bind(false)
            .fetch_one(self.db_client.pool())
            .await
            .map_err(|e| {
                let err = DbError::from_query(e);
                if !matches!(err, DbError::UniqueViolation(_)) {
                    error!("Failed to insert appointment: {}", err);
                }
                err
            })?;

        let created = appointment_from_row(&row)?;
        info!("Appointment {} created successfully", created.id);
        Ok(created)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DbError> {
        debug!("Finding appointment: {}", id);
        fetch_by_id(self.db_client.pool(), self.db_client.backend(), id).await
    }

    async fn list(&self, filter: &AppointmentFilter) -> Result<Vec<Appointment>, DbError> {
        debug!("Listing appointments with filter: {:?}", filter);

        let sql = list_query(filter, self.db_client.backend());
        let mut query = sqlx::query(&sql);
        if let Some(date) = filter.date {
            query = query.bind(format_timestamp(date));
        }
        if let Some(dentist_name) = &filter.dentist_name {
            query = query.bind(dentist_name.clone());
        }

        let rows = query
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list appointments: {}", e);
                DbError::from_query(e)
            })?;

        rows.iter().map(appointment_from_row).collect()
    }

    async fn cancel(&self, id: i64) -> Result<Option<Appointment>, DbError> {
        debug!("Canceling appointment: {}", id);

        let backend = self.db_client.backend();
        let mut tx = self.db_client.begin().await?;

        // Dropping the transaction on any early return rolls it back.
        if fetch_by_id(&mut *tx, backend, id).await?.is_none() {
            debug!("Appointment {} not found", id);
            return Ok(None);
        }

        let query = format!(
            "UPDATE appointments SET is_canceled = $1 WHERE id = $2 RETURNING {}",
            select_columns(backend)
        );
        let row = sqlx::query(&query)
            .bind(true)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to cancel appointment {}: {}", id, e);
                DbError::from_query(e)
            })?;
        let canceled = appointment_from_row(&row)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Appointment {} canceled", id);
        Ok(Some(canceled))
    }
}
