//! Patient model.

use std::convert::Infallible;

use serde::{Deserialize, Serialize};

use super::PatientLog;
use crate::store::{Entity, Resource};

/// A registered patient with their visit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nic: String,
    #[serde(default)]
    pub contact_numbers: Vec<String>,
    #[serde(default)]
    pub logs: Vec<PatientLog>,
}

/// Request body for creating or editing a patient.
///
/// Edits replace every field; nothing is merged on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    pub name: String,
    pub email: String,
    pub nic: String,
    pub contact_numbers: Vec<String>,
}

impl Entity for Patient {
    type Key = String;
    type Change = Infallible;

    fn key(&self) -> &String {
        &self.id
    }

    fn apply(&mut self, change: Infallible) {
        match change {}
    }
}

impl Resource for Patient {
    type Input = PatientInput;

    const COLLECTION: &'static str = "/patients";
}
