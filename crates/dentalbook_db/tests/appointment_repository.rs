use chrono::{NaiveDate, NaiveDateTime};
use dentalbook_db::{
    AppointmentFilter, AppointmentRepository, DbClient, DbError, NewAppointment,
    SqlAppointmentRepository,
};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

async fn repository() -> SqlAppointmentRepository {
    let client = DbClient::from_url("sqlite::memory:").await.unwrap();
    let repository = SqlAppointmentRepository::new(client);
    repository.init_schema().await.unwrap();
    repository
}

fn booking(patient: &str, dentist: &str, date: NaiveDateTime) -> NewAppointment {
    NewAppointment::new(patient.to_string(), dentist.to_string(), date)
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let repository = repository().await;
    repository.init_schema().await.unwrap();
    assert!(repository
        .list(&AppointmentFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_create_assigns_id_and_defaults_to_active() {
    let repository = repository().await;

    let first = repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();
    let second = repository
        .create(booking("Alice Doe", "Dr. Smith", at(7, 10)))
        .await
        .unwrap();

    assert_eq!(first.patient_name, "John Doe");
    assert_eq!(first.dentist_name, "Dr. Smith");
    assert_eq!(first.appointment_date, at(6, 10));
    assert!(!first.is_canceled);
    assert_ne!(first.id, second.id);

    let stored = repository.find_by_id(first.id).await.unwrap();
    assert_eq!(stored, Some(first));
}

#[tokio::test]
async fn test_slot_lookup_is_exact() {
    let repository = repository().await;
    let created = repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();

    assert_eq!(
        repository.find_by_slot("Dr. Smith", at(6, 10)).await.unwrap(),
        Some(created)
    );
    assert_eq!(repository.find_by_slot("Dr. Smith", at(6, 11)).await.unwrap(), None);
    assert_eq!(repository.find_by_slot("dr. smith", at(6, 10)).await.unwrap(), None);
}

#[tokio::test]
async fn test_unique_index_rejects_duplicate_slot() {
    let repository = repository().await;
    repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();

    let duplicate = repository
        .create(booking("Jane Roe", "Dr. Smith", at(6, 10)))
        .await;

    assert!(matches!(duplicate, Err(DbError::UniqueViolation(_))));
    assert_eq!(
        repository
            .list(&AppointmentFilter::default())
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn test_list_filters_combine() {
    let repository = repository().await;
    let a1 = repository
        .create(booking("P1", "Dr. A", at(6, 10)))
        .await
        .unwrap();
    let a2 = repository
        .create(booking("P2", "Dr. A", at(7, 10)))
        .await
        .unwrap();
    let b1 = repository
        .create(booking("P3", "Dr. B", at(6, 10)))
        .await
        .unwrap();

    let all = repository.list(&AppointmentFilter::default()).await.unwrap();
    assert_eq!(all, vec![a1.clone(), a2.clone(), b1.clone()]);

    let by_dentist = repository
        .list(&AppointmentFilter {
            date: None,
            dentist_name: Some("Dr. A".into()),
        })
        .await
        .unwrap();
    assert_eq!(by_dentist, vec![a1.clone(), a2]);

    let by_date = repository
        .list(&AppointmentFilter {
            date: Some(at(6, 10)),
            dentist_name: None,
        })
        .await
        .unwrap();
    assert_eq!(by_date, vec![a1.clone(), b1]);

    let both = repository
        .list(&AppointmentFilter {
            date: Some(at(6, 10)),
            dentist_name: Some("Dr. A".into()),
        })
        .await
        .unwrap();
    assert_eq!(both, vec![a1]);
}

#[tokio::test]
async fn test_cancel_sets_flag_and_repeats() {
    let repository = repository().await;
    let created = repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();

    let canceled = repository.cancel(created.id).await.unwrap().unwrap();
    assert!(canceled.is_canceled);
    assert_eq!(canceled.id, created.id);

    let again = repository.cancel(created.id).await.unwrap().unwrap();
    assert!(again.is_canceled);

    let stored = repository.find_by_id(created.id).await.unwrap().unwrap();
    assert!(stored.is_canceled);
}

#[tokio::test]
async fn test_cancel_missing_returns_none() {
    let repository = repository().await;
    assert_eq!(repository.cancel(404).await.unwrap(), None);
}

#[tokio::test]
async fn test_rows_deleted_directly_in_store() {
    let repository = repository().await;
    repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();

    let deleted = repository
        .db_client()
        .execute("DELETE FROM appointments")
        .await
        .unwrap();

    assert_eq!(deleted, 1);
    assert!(repository
        .list(&AppointmentFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_canceled_flag_reads_back_from_sqlite() {
    let repository = repository().await;
    let active = repository
        .create(booking("John Doe", "Dr. Smith", at(6, 10)))
        .await
        .unwrap();
    let canceled = repository
        .create(booking("Jane Roe", "Dr. Smith", at(6, 11)))
        .await
        .unwrap();
    repository.cancel(canceled.id).await.unwrap();

    let flags: Vec<(i64, bool)> = repository
        .list(&AppointmentFilter::default())
        .await
        .unwrap()
        .into_iter()
        .map(|appointment| (appointment.id, appointment.is_canceled))
        .collect();
    assert_eq!(flags, vec![(active.id, false), (canceled.id, true)]);

    let taken = repository
        .find_by_slot("Dr. Smith", at(6, 11))
        .await
        .unwrap()
        .unwrap();
    assert!(taken.is_canceled);
}

/// Runs against a live server when `DENTALBOOK_TEST_POSTGRES_URL` is set.
#[cfg(feature = "postgres")]
mod postgres {
    use super::*;
    use dentalbook_db::DbBackend;

    const URL_VAR: &str = "DENTALBOOK_TEST_POSTGRES_URL";

    // A table shaped like one created by an earlier deployment: serial ids,
    // nullable columns, a real timestamp column.
    const LEGACY_TABLE: &str = r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id SERIAL PRIMARY KEY,
            patient_name VARCHAR,
            dentist_name VARCHAR,
            appointment_date TIMESTAMP,
            is_canceled BOOLEAN DEFAULT FALSE
        )
    "#;

    #[tokio::test]
    async fn test_timestamp_column_round_trip() {
        let Ok(url) = std::env::var(URL_VAR) else {
            eprintln!("{URL_VAR} not set, skipping");
            return;
        };
        let client = DbClient::from_url(&url).await.unwrap();
        assert_eq!(client.backend(), DbBackend::Postgres);
        client.execute(LEGACY_TABLE).await.unwrap();

        let repository = SqlAppointmentRepository::new(client);
        repository.init_schema().await.unwrap();

        // Unique per run so reruns against the same database do not collide.
        let dentist = format!(
            "Dr. Test {}",
            chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
        );
        let created = repository
            .create(booking("John Doe", &dentist, at(6, 10)))
            .await
            .unwrap();
        assert_eq!(created.appointment_date, at(6, 10));
        assert!(!created.is_canceled);

        let found = repository
            .find_by_slot(&dentist, at(6, 10))
            .await
            .unwrap();
        assert_eq!(found, Some(created.clone()));

        let listed = repository
            .list(&AppointmentFilter {
                date: Some(at(6, 10)),
                dentist_name: Some(dentist.clone()),
            })
            .await
            .unwrap();
        assert_eq!(listed, vec![created.clone()]);

        assert!(matches!(
            repository
                .create(booking("Jane Roe", &dentist, at(6, 10)))
                .await,
            Err(DbError::UniqueViolation(_))
        ));

        let canceled = repository.cancel(created.id).await.unwrap().unwrap();
        assert!(canceled.is_canceled);
        assert_eq!(canceled.appointment_date, at(6, 10));
    }
}
