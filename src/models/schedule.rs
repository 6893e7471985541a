//! Dentist schedule model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Booking;
use crate::errors::{AppError, FieldError};
use crate::store::{Entity, Resource};

/// Status of a schedule slot block.
///
/// The wire format is always upper snake case. Parsing accepts any casing so
/// that `"unavailable"` and `"UNAVAILABLE"` name the same status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    Available,
    Unavailable,
    Cancelled,
    Full,
    Finished,
    Active,
    OnGoing,
}

impl ScheduleStatus {
    pub const ALL: [ScheduleStatus; 7] = [
        ScheduleStatus::Available,
        ScheduleStatus::Unavailable,
        ScheduleStatus::Cancelled,
        ScheduleStatus::Full,
        ScheduleStatus::Finished,
        ScheduleStatus::Active,
        ScheduleStatus::OnGoing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleStatus::Available => "AVAILABLE",
            ScheduleStatus::Unavailable => "UNAVAILABLE",
            ScheduleStatus::Cancelled => "CANCELLED",
            ScheduleStatus::Full => "FULL",
            ScheduleStatus::Finished => "FINISHED",
            ScheduleStatus::Active => "ACTIVE",
            ScheduleStatus::OnGoing => "ON_GOING",
        }
    }

    /// Statuses a schedule may be created or edited with.
    pub fn is_editable(&self) -> bool {
        matches!(
            self,
            ScheduleStatus::Available | ScheduleStatus::Unavailable | ScheduleStatus::Full
        )
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ScheduleStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                AppError::Validation(vec![FieldError::new(
                    "status",
                    format!("Unknown schedule status: {}", s),
                )])
            })
    }
}

/// A dentist's schedule for one day window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub day_of_week: String,
    pub status: ScheduleStatus,
    #[serde(default)]
    pub number_of_bookings: u32,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub duration: f64,
    pub dentist_id: String,
    #[serde(default)]
    pub created_at: String,
    pub capacity: u32,
    #[serde(default)]
    pub available_slots: i32,
}

/// Request body for creating or editing a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleInput {
    pub date: String,
    pub status: ScheduleStatus,
    pub start_time: String,
    pub end_time: String,
    pub dentist_id: String,
    pub capacity: u32,
}

/// Compact schedule listing used by the booking form's picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectSchedule {
    pub id: String,
    pub date: String,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
}

/// In-place changes the schedule store applies to a single schedule.
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleChange {
    /// The API's copy after a status transition; it replaces ours.
    StatusUpdated(Schedule),
}

impl Entity for Schedule {
    type Key = String;
    type Change = ScheduleChange;

    fn key(&self) -> &String {
        &self.id
    }

    fn apply(&mut self, change: ScheduleChange) {
        match change {
            ScheduleChange::StatusUpdated(schedule) => *self = schedule,
        }
    }
}

impl Resource for Schedule {
    type Input = ScheduleInput;

    const COLLECTION: &'static str = "/schedules";
}
