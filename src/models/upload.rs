//! Wire types for the photo upload flow.

use serde::{Deserialize, Serialize};

/// Request body for `/s3/generate-presigned-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub file_name: String,
    pub file_type: String,
}

/// A pre-signed write URL and the storage key it writes to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresignedUpload {
    pub url: String,
    pub key: String,
}

/// Request body registering stored objects against a patient log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPhotos {
    pub s3_keys: Vec<String>,
}
