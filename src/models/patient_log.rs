//! Patient visit log and its photo attachments.

use serde::{Deserialize, Serialize};

use crate::store::Entity;

/// A photo attached to a patient log. URLs are issued by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPhoto {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
}

/// One entry in a patient's log book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientLog {
    pub id: String,
    pub action_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub dentist_name: String,
    #[serde(default)]
    pub photos: Vec<LogPhoto>,
}

/// Request body for creating a log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInput {
    pub action_type: String,
    pub description: String,
    pub dentist_id: String,
}

/// In-place changes the log store applies to a single log.
#[derive(Debug, Clone, PartialEq)]
pub enum LogChange {
    /// Photos are only ever appended.
    PhotoAdded(LogPhoto),
}

impl Entity for PatientLog {
    type Key = String;
    type Change = LogChange;

    fn key(&self) -> &String {
        &self.id
    }

    fn apply(&mut self, change: LogChange) {
        match change {
            LogChange::PhotoAdded(photo) => self.photos.push(photo),
        }
    }
}
