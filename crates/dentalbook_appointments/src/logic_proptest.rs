#[cfg(test)]
mod tests {
    use crate::error::AppointmentError;
    use crate::logic::{validate_request, CreateAppointmentRequest};
    use chrono::{NaiveDate, Timelike};
    use proptest::prelude::*;

    fn request(patient: String, dentist: String, millis: u32) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            patient_name: patient,
            dentist_name: dentist,
            appointment_date: NaiveDate::from_ymd_opt(2024, 12, 6)
                .unwrap()
                .and_hms_milli_opt(10, 30, 15, millis)
                .unwrap(),
        }
    }

    proptest! {
        #[test]
        fn blank_names_never_validate(
            blank in "[ \t\n]{0,8}",
            name in "[A-Za-z][A-Za-z .'-]{0,30}",
            millis in 0u32..1000,
        ) {
            let as_patient = validate_request(request(blank.clone(), name.clone(), millis));
            prop_assert!(matches!(as_patient, Err(AppointmentError::Validation(_))));

            let as_dentist = validate_request(request(name, blank, millis));
            prop_assert!(matches!(as_dentist, Err(AppointmentError::Validation(_))));
        }

        #[test]
        fn valid_requests_keep_names_and_whole_seconds(
            patient in "[A-Za-z][A-Za-z .'-]{0,30}",
            dentist in "[A-Za-z][A-Za-z .'-]{0,30}",
            millis in 0u32..1000,
        ) {
            let appointment = validate_request(request(patient.clone(), dentist.clone(), millis)).unwrap();
            prop_assert_eq!(appointment.patient_name, patient);
            prop_assert_eq!(appointment.dentist_name, dentist);
            prop_assert_eq!(appointment.appointment_date.nanosecond(), 0);
            prop_assert_eq!(appointment.appointment_date.second(), 15);
        }
    }
}
