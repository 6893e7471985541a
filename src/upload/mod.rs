//! Photo upload flow for patient logs.
//!
//! Three phases: ask the API for a pre-signed URL, PUT the bytes straight to
//! object storage, then register the storage key on the log through the log
//! store. Nothing is rolled back when a later phase fails; the error names
//! the phase and, once issued, the storage key of the possibly orphaned object.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use crate::client::{self, HttpClient};
use crate::errors::{AppError, FieldError, UploadPhase};
use crate::models::{LogPhoto, PresignRequest, PresignedUpload};
use crate::store::PatientLogStore;

const PRESIGN_PATH: &str = "/s3/generate-presigned-url";

/// A file picked for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    fn check(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.file_name.trim().is_empty() {
            errors.push(FieldError::new("file", "Please select a file to upload."));
        }
        if !self.content_type.starts_with("image/") {
            errors.push(FieldError::new("file", "Only image files can be attached"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

pub struct PhotoUploader {
    api: HttpClient,
    /// Storage PUTs go through their own client so the API session cookie
    /// is never sent to the storage host.
    storage: reqwest::Client,
    logs: Arc<PatientLogStore>,
}

impl PhotoUploader {
    pub fn new(api: HttpClient, logs: Arc<PatientLogStore>) -> Self {
        Self {
            api,
            storage: reqwest::Client::new(),
            logs,
        }
    }

    /// Upload `file` and attach it to the given log.
    pub async fn attach(
        &self,
        patient_id: &str,
        log_id: &str,
        file: UploadFile,
    ) -> Result<LogPhoto, AppError> {
        file.check()?;

        let request = PresignRequest {
            file_name: file.file_name.clone(),
            file_type: file.content_type.clone(),
        };
        let presigned: PresignedUpload = self
            .api
            .post(PRESIGN_PATH, &request)
            .await
            .map_err(|e| phase_error(UploadPhase::Presign, None, e))?;
        tracing::debug!("Pre-signed upload issued for key {}", presigned.key);

        let put = self
            .storage
            .put(&presigned.url)
            .header(CONTENT_TYPE, &file.content_type)
            .body(file.bytes);
        client::send(put)
            .await
            .map_err(|e| phase_error(UploadPhase::Transfer, Some(&presigned.key), e))?;

        self.logs
            .add_photo(patient_id, log_id, &presigned.key)
            .await
            .map_err(|e| {
                tracing::warn!(
                    "Object {} stored but not registered on log {}",
                    presigned.key,
                    log_id
                );
                phase_error(UploadPhase::Register, Some(&presigned.key), e)
            })
    }
}

fn phase_error(phase: UploadPhase, key: Option<&str>, source: AppError) -> AppError {
    AppError::Upload {
        phase,
        key: key.map(str::to_string),
        source: Box::new(source),
    }
}
