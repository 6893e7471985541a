//! Client-side validation of form inputs.
//!
//! Mirrors the console's form schemas so obviously bad input is rejected
//! before a request is made. The API remains the authority.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

use crate::errors::{AppError, FieldError};
use crate::models::{BookingInput, FeedbackInput, LogInput, PatientInput, ScheduleInput, MAX_RATING};

/// Old (9 digits + V/X) and new (12 digits) national identity card numbers.
static NIC_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{9}[VX]|[1-9]\d{11})$").expect("Invalid NIC regex"));

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{10}$").expect("Invalid phone regex"));

static TIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]\d|2[0-3]):([0-5]\d):([0-5]\d)$").expect("Invalid time regex")
});

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex")
});

const MAX_BOOKING_NAME_LEN: usize = 20;

/// Input that can be checked before it is sent.
pub trait Validate {
    /// Collect every field error; `Err(AppError::Validation)` if there are any.
    fn validate(&self) -> Result<(), AppError>;

    /// Rules for editing an existing record. Same as creation unless overridden.
    fn validate_update(&self) -> Result<(), AppError> {
        self.validate()
    }
}

/// Accumulates field errors for one input.
#[derive(Default)]
struct Checker {
    errors: Vec<FieldError>,
}

impl Checker {
    fn fail(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError::new(field, message));
    }

    fn required(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fail(field, message);
        }
    }

    fn email(&mut self, field: &'static str, value: &str) {
        if !EMAIL_REGEX.is_match(value.trim()) {
            self.fail(field, "Invalid email address");
        }
    }

    fn nic(&mut self, field: &'static str, value: &str) {
        if !NIC_REGEX.is_match(value.trim()) {
            self.fail(field, "Please enter a valid NIC number");
        }
    }

    fn time(&mut self, field: &'static str, value: &str, label: &str) {
        if value.trim().is_empty() {
            self.fail(field, &format!("{} is required", label));
        } else if !TIME_REGEX.is_match(value) || NaiveTime::parse_from_str(value, "%H:%M:%S").is_err()
        {
            self.fail(field, "Invalid time format (HH:MM:SS)");
        }
    }

    fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Split the comma-separated contact number field into trimmed numbers.
pub fn parse_contact_numbers(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

impl Validate for PatientInput {
    fn validate(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name is required");
        check.email("email", &self.email);
        check.nic("nic", &self.nic);
        if self.contact_numbers.is_empty() {
            check.fail("contactNumbers", "At least one contact number is required");
        } else if !self
            .contact_numbers
            .iter()
            .all(|n| PHONE_REGEX.is_match(n.trim()))
        {
            check.fail(
                "contactNumbers",
                "Please enter valid phone numbers, separated by commas",
            );
        }
        check.finish()
    }
}

impl Validate for BookingInput {
    fn validate(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name is required");
        if self.name.chars().count() > MAX_BOOKING_NAME_LEN {
            check.fail("name", "Name should be less than 20 characters");
        }
        check.nic("nic", &self.nic);
        if !PHONE_REGEX.is_match(self.contact_number.trim()) {
            check.fail("contactNumber", "Contact number must be 10 digits");
        }
        check.email("email", &self.email);
        check.required("address", &self.address, "Address is required");
        check.required("scheduleId", &self.schedule_id, "Schedule Id is required");
        check.finish()
    }
}

impl ScheduleInput {
    /// Field rules shared by create and edit.
    fn check_fields(&self, check: &mut Checker) {
        if self.date.trim().is_empty() {
            check.fail("date", "Date is required");
        } else if NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").is_err() {
            check.fail("date", "Invalid date format");
        }
        check.time("startTime", &self.start_time, "Start time");
        check.time("endTime", &self.end_time, "End time");
        check.required(
            "dentistId",
            &self.dentist_id,
            "Dentist ID must be a positive number",
        );
        if self.capacity < 1 {
            check.fail("capacity", "Capacity must be a positive number");
        }
    }
}

impl Validate for ScheduleInput {
    /// New schedules may only start out AVAILABLE, UNAVAILABLE or FULL.
    fn validate(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        if !self.status.is_editable() {
            check.fail("status", "Status must be AVAILABLE, UNAVAILABLE, or FULL");
        }
        self.check_fields(&mut check);
        check.finish()
    }

    /// An edit keeps whatever status the API has moved the schedule to.
    fn validate_update(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        self.check_fields(&mut check);
        check.finish()
    }
}

impl Validate for LogInput {
    fn validate(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        check.required("actionType", &self.action_type, "Action Type is required");
        check.required("description", &self.description, "Description is required");
        check.required("dentistId", &self.dentist_id, "Dentist ID is required");
        check.finish()
    }
}

impl Validate for FeedbackInput {
    fn validate(&self) -> Result<(), AppError> {
        let mut check = Checker::default();
        check.required("name", &self.name, "Name is required");
        if !self.rating.is_finite() || !(0.0..=MAX_RATING).contains(&self.rating) {
            check.fail("rating", "Rating must be between 0 and 5");
        }
        check.email("email", &self.email);
        check.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleStatus;

    fn field_names(err: AppError) -> Vec<&'static str> {
        match err {
            AppError::Validation(errors) => errors.into_iter().map(|e| e.field).collect(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    fn patient() -> PatientInput {
        PatientInput {
            name: "Kamal Perera".to_string(),
            email: "kamal@example.com".to_string(),
            nic: "912345678V".to_string(),
            contact_numbers: vec!["0771234567".to_string()],
        }
    }

    fn schedule() -> ScheduleInput {
        ScheduleInput {
            date: "2025-03-01".to_string(),
            status: ScheduleStatus::Available,
            start_time: "09:00:00".to_string(),
            end_time: "10:00:00".to_string(),
            dentist_id: "5".to_string(),
            capacity: 3,
        }
    }

    #[test]
    fn test_valid_patient() {
        assert!(patient().validate().is_ok());

        let mut new_nic = patient();
        new_nic.nic = "199012345678".to_string();
        assert!(new_nic.validate().is_ok());
    }

    #[test]
    fn test_patient_collects_every_error() {
        let input = PatientInput {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            nic: "12345".to_string(),
            contact_numbers: vec!["0771234567".to_string(), "123".to_string()],
        };
        assert_eq!(
            field_names(input.validate().unwrap_err()),
            vec!["name", "email", "nic", "contactNumbers"]
        );
    }

    #[test]
    fn test_patient_needs_a_contact_number() {
        let mut input = patient();
        input.contact_numbers.clear();
        assert_eq!(field_names(input.validate().unwrap_err()), vec!["contactNumbers"]);
    }

    #[test]
    fn test_parse_contact_numbers() {
        assert_eq!(
            parse_contact_numbers("0771234567, 0112345678,,"),
            vec!["0771234567".to_string(), "0112345678".to_string()]
        );
        assert!(parse_contact_numbers("  ").is_empty());
    }

    #[test]
    fn test_booking_rules() {
        let input = BookingInput {
            name: "A name that is far too long".to_string(),
            nic: "912345678X".to_string(),
            contact_number: "07712".to_string(),
            email: "guest@example.com".to_string(),
            address: String::new(),
            schedule_id: "101".to_string(),
        };
        assert_eq!(
            field_names(input.validate().unwrap_err()),
            vec!["name", "contactNumber", "address"]
        );
    }

    #[test]
    fn test_valid_schedule() {
        assert!(schedule().validate().is_ok());
    }

    #[test]
    fn test_schedule_rejects_bad_fields() {
        let input = ScheduleInput {
            date: "2025-02-30".to_string(),
            status: ScheduleStatus::Finished,
            start_time: "9:00".to_string(),
            end_time: "24:00:00".to_string(),
            dentist_id: String::new(),
            capacity: 0,
        };
        assert_eq!(
            field_names(input.validate().unwrap_err()),
            vec!["status", "date", "startTime", "endTime", "dentistId", "capacity"]
        );
    }

    #[test]
    fn test_schedule_edit_accepts_any_status() {
        for status in ScheduleStatus::ALL {
            let mut input = schedule();
            input.status = status;
            assert!(input.validate_update().is_ok(), "{status} should be editable");
        }

        let mut input = schedule();
        input.status = ScheduleStatus::OnGoing;
        input.capacity = 0;
        assert_eq!(field_names(input.validate_update().unwrap_err()), vec!["capacity"]);
    }

    #[test]
    fn test_schedule_create_rejects_progress_statuses() {
        for status in [
            ScheduleStatus::Cancelled,
            ScheduleStatus::Finished,
            ScheduleStatus::Active,
            ScheduleStatus::OnGoing,
        ] {
            let mut input = schedule();
            input.status = status;
            assert_eq!(field_names(input.validate().unwrap_err()), vec!["status"]);
        }
    }

    #[test]
    fn test_log_requires_all_fields() {
        let input = LogInput {
            action_type: String::new(),
            description: "Scaling".to_string(),
            dentist_id: String::new(),
        };
        assert_eq!(
            field_names(input.validate().unwrap_err()),
            vec!["actionType", "dentistId"]
        );
    }

    #[test]
    fn test_feedback_rating_range() {
        let mut input = FeedbackInput {
            name: "Sunil".to_string(),
            rating: 4.5,
            email: "sunil@example.com".to_string(),
            comments: String::new(),
            show_on_website: false,
        };
        assert!(input.validate().is_ok());

        input.rating = 5.5;
        assert_eq!(field_names(input.validate().unwrap_err()), vec!["rating"]);
    }
}
