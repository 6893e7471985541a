//! Booking (appointment) model.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use crate::store::{Entity, Resource};

/// Lifecycle of a booking. Transitions are decided by the API.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Active,
    Cancel,
    Absent,
    Finished,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Active => "ACTIVE",
            BookingStatus::Cancel => "CANCEL",
            BookingStatus::Absent => "ABSENT",
            BookingStatus::Finished => "FINISHED",
        }
    }
}

/// A patient's booking on a schedule, keyed by its reference id.
///
/// Schedule and dentist fields are denormalized copies for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub reference_id: String,
    pub name: String,
    #[serde(default)]
    pub nic: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    pub schedule_id: String,
    pub status: BookingStatus,
    #[serde(default)]
    pub date: String,
    // The API spells this one in lowercase.
    #[serde(default, rename = "dayofweek")]
    pub day_of_week: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub schedule_date: String,
    #[serde(default)]
    pub doctor_name: String,
}

/// Request body for creating or editing a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    pub name: String,
    pub nic: String,
    pub contact_number: String,
    pub email: String,
    pub address: String,
    pub schedule_id: String,
}

impl Entity for Booking {
    type Key = String;
    type Change = Infallible;

    fn key(&self) -> &String {
        &self.reference_id
    }

    fn apply(&mut self, change: Infallible) {
        match change {}
    }
}

impl Resource for Booking {
    type Input = BookingInput;

    const COLLECTION: &'static str = "/bookings";
}
