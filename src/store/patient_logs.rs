//! Patient log store. Logs live under a patient, so every call names one.

use std::sync::Arc;

use tokio::sync::watch;

use super::{Action, Store};
use crate::client::{segment, HttpClient};
use crate::errors::AppError;
use crate::models::{LogChange, LogInput, LogPhoto, PatientLog, RegisterPhotos};
use crate::validation::Validate;

fn logs_path(patient_id: &str) -> Result<String, AppError> {
    Ok(format!("/patients/{}/logs", segment(patient_id)?))
}

fn log_path(patient_id: &str, log_id: &str) -> Result<String, AppError> {
    Ok(format!("{}/{}", logs_path(patient_id)?, segment(log_id)?))
}

/// Log book of the patient currently being viewed.
pub struct PatientLogStore {
    client: HttpClient,
    store: Store<PatientLog>,
}

impl PatientLogStore {
    pub fn new(client: HttpClient) -> Self {
        Self {
            client,
            store: Store::new("patient logs"),
        }
    }

    pub fn snapshot(&self) -> Arc<Vec<PatientLog>> {
        self.store.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<PatientLog>>> {
        self.store.subscribe()
    }

    /// Load logs that arrived embedded in a patient record. No request is made.
    pub fn hydrate(&self, logs: Vec<PatientLog>) {
        self.store.dispatch(Action::FetchAll(logs));
    }

    /// Replace the collection with the patient's logs from the API.
    pub async fn fetch_for_patient(&self, patient_id: &str) -> Result<(), AppError> {
        let logs: Vec<PatientLog> = self.client.get(&logs_path(patient_id)?).await?;
        self.store.dispatch(Action::FetchAll(logs));
        Ok(())
    }

    pub async fn create(&self, patient_id: &str, input: &LogInput) -> Result<PatientLog, AppError> {
        input.validate()?;
        let log: PatientLog = self.client.post(&logs_path(patient_id)?, input).await?;
        self.store.dispatch(Action::Create(log.clone()));
        Ok(log)
    }

    pub async fn delete(&self, patient_id: &str, log_id: &str) -> Result<(), AppError> {
        self.client.delete(&log_path(patient_id, log_id)?).await?;
        self.store.dispatch(Action::Delete(log_id.to_string()));
        Ok(())
    }

    /// Fetch one log without touching the store.
    pub async fn get_by_id(&self, patient_id: &str, log_id: &str) -> Result<PatientLog, AppError> {
        self.client.get(&log_path(patient_id, log_id)?).await
    }

    /// Register an uploaded object against a log and append the API's photo record.
    pub async fn add_photo(
        &self,
        patient_id: &str,
        log_id: &str,
        storage_key: &str,
    ) -> Result<LogPhoto, AppError> {
        let body = RegisterPhotos {
            s3_keys: vec![storage_key.to_string()],
        };
        let path = format!("{}/photos", log_path(patient_id, log_id)?);
        let photo: LogPhoto = self.client.post(&path, &body).await?;
        self.store.dispatch(Action::Change {
            key: log_id.to_string(),
            change: LogChange::PhotoAdded(photo.clone()),
        });
        Ok(photo)
    }
}
