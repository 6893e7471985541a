//! Error handling module for the dental console client.
//!
//! Provides the centralized error type surfaced by the HTTP adapter, the stores
//! and the upload flow, plus decoding of the API's error envelopes.

use serde::Deserialize;
use serde_json::Value;

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
    pub const SERVER_ERROR: &str = "SERVER_ERROR";
    pub const DECODE_ERROR: &str = "DECODE_ERROR";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const MISSING_PROVIDER: &str = "MISSING_PROVIDER";
    pub const UPLOAD_ERROR: &str = "UPLOAD_ERROR";
    pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
}

/// A single rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Step of the photo upload flow that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// Requesting the pre-signed URL from the API
    Presign,
    /// Sending the bytes to object storage
    Transfer,
    /// Registering the storage key against the patient log
    Register,
}

impl UploadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadPhase::Presign => "presign",
            UploadPhase::Transfer => "transfer",
            UploadPhase::Register => "register",
        }
    }
}

/// Client error type.
#[derive(Debug)]
pub enum AppError {
    /// The request never produced a response
    Transport(String),
    /// The API answered with a non-success status
    Server {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },
    /// The response body did not match the expected shape
    Decode(String),
    /// Input rejected before any request was issued
    Validation(Vec<FieldError>),
    /// A hook was used where no store was provided
    MissingProvider(&'static str),
    /// One phase of the photo upload failed
    Upload {
        phase: UploadPhase,
        /// Storage key, once the API has issued one
        key: Option<String>,
        source: Box<AppError>,
    },
    /// Malformed configuration
    Config(String),
}

impl AppError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Transport(_) => codes::TRANSPORT_ERROR,
            AppError::Server { .. } => codes::SERVER_ERROR,
            AppError::Decode(_) => codes::DECODE_ERROR,
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::MissingProvider(_) => codes::MISSING_PROVIDER,
            AppError::Upload { .. } => codes::UPLOAD_ERROR,
            AppError::Config(_) => codes::CONFIG_ERROR,
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Transport(msg) => msg.clone(),
            AppError::Server {
                status, message, ..
            } => match message {
                Some(message) => format!("HTTP {}: {}", status, message),
                None => format!("HTTP {}", status),
            },
            AppError::Decode(msg) => msg.clone(),
            AppError::Validation(errors) => errors
                .iter()
                .map(|e| format!("{}: {}", e.field, e.message))
                .collect::<Vec<_>>()
                .join("; "),
            AppError::MissingProvider(msg) => msg.to_string(),
            AppError::Upload { phase, source, .. } => {
                format!("upload failed during {}: {}", phase.as_str(), source)
            }
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// HTTP status reported by the API, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Server { status, .. } => Some(*status),
            AppError::Upload { source, .. } => source.status(),
            _ => None,
        }
    }

    /// The message a form should display: the server-supplied detail when
    /// there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Server {
                message: Some(message),
                ..
            } => message.clone(),
            AppError::Validation(errors) if !errors.is_empty() => errors[0].message.clone(),
            AppError::Upload { source, .. } => source.user_message(fallback),
            _ => fallback.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Upload { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            tracing::warn!("Response decode error: {:?}", err);
            return AppError::Decode(format!("Decode error: {}", err));
        }
        if let Some(status) = err.status() {
            return AppError::Server {
                status: status.as_u16(),
                code: None,
                message: None,
            };
        }
        tracing::warn!("Transport error: {:?}", err);
        AppError::Transport(format!("Transport error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::warn!("JSON error: {:?}", err);
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<reqwest::header::InvalidHeaderValue> for AppError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        AppError::Config(format!("Invalid header value: {}", err))
    }
}

/// Plain-text error bodies longer than this are not shown to the user.
const MAX_PLAIN_TEXT_LEN: usize = 200;

/// Error body returned by the clinic API.
///
/// The API is not consistent about where it puts the human-readable text or
/// what type it gives it, so every known location is an untyped JSON value
/// and only strings are used.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub details: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub message: Option<Value>,
}

fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A short, single-line body without markup, e.g. `"Schedule is full"`.
fn is_plain_text(body: &str) -> bool {
    let body = body.trim();
    !body.is_empty()
        && body.len() <= MAX_PLAIN_TEXT_LEN
        && !body.contains(['<', '>', '{', '}', '\n'])
}

impl ErrorResponse {
    /// First string among `details.error`, `error` and `message`.
    pub fn detail(&self) -> Option<String> {
        text(self.details.as_ref().and_then(|d| d.get("error")))
            .or_else(|| text(self.error.as_ref()))
            .or_else(|| text(self.message.as_ref()))
    }

    /// Build an `AppError::Server` from a status and raw response text.
    ///
    /// HTML pages, oversized bodies and JSON without a usable string detail
    /// leave `message` empty so the caller's fallback is shown instead.
    pub fn into_app_error(status: u16, body: &str) -> AppError {
        let (code, message) = match serde_json::from_str::<Value>(body) {
            Ok(value) => {
                let parsed: ErrorResponse = serde_json::from_value(value).unwrap_or_default();
                (text(parsed.error.as_ref()), parsed.detail())
            }
            Err(_) if is_plain_text(body) => (None, Some(body.trim().to_string())),
            Err(_) => (None, None),
        };
        AppError::Server {
            status,
            code,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_prefers_nested_error() {
        let body = r#"{"details":{"error":"NIC already registered"},"error":"Conflict","message":"x"}"#;
        let err = ErrorResponse::into_app_error(409, body);
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.user_message("fallback"), "NIC already registered");
    }

    #[test]
    fn test_detail_falls_back_to_error_then_message() {
        let err = ErrorResponse::into_app_error(400, r#"{"error":"Bad schedule"}"#);
        assert_eq!(err.user_message("fallback"), "Bad schedule");

        let err = ErrorResponse::into_app_error(400, r#"{"message":"Only message"}"#);
        assert_eq!(err.user_message("fallback"), "Only message");
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let err = ErrorResponse::into_app_error(500, "upstream exploded");
        assert_eq!(err.user_message("fallback"), "upstream exploded");
    }

    #[test]
    fn test_html_body_uses_fallback() {
        let err = ErrorResponse::into_app_error(502, "<html><body>502 Bad Gateway</body></html>");
        assert_eq!(err.status(), Some(502));
        assert_eq!(err.user_message("An error occurred"), "An error occurred");
    }

    #[test]
    fn test_non_string_error_field_is_skipped() {
        let err = ErrorResponse::into_app_error(400, r#"{"error":{"code":"X"},"message":"Bad input"}"#);
        assert_eq!(err.user_message("An error occurred"), "Bad input");
        assert!(matches!(err, AppError::Server { code: None, .. }));

        let err = ErrorResponse::into_app_error(400, r#"{"error":{"code":"X"}}"#);
        assert_eq!(err.user_message("An error occurred"), "An error occurred");

        let err = ErrorResponse::into_app_error(400, r#"["not","an","object"]"#);
        assert_eq!(err.user_message("An error occurred"), "An error occurred");
    }

    #[test]
    fn test_empty_nested_detail_falls_through() {
        let err = ErrorResponse::into_app_error(409, r#"{"details":{"error":" "},"error":"Conflict"}"#);
        assert_eq!(err.user_message("fallback"), "Conflict");
    }

    #[test]
    fn test_empty_body_uses_fallback() {
        let err = ErrorResponse::into_app_error(502, "");
        assert_eq!(err.user_message("An error occurred"), "An error occurred");
        assert_eq!(err.error_code(), codes::SERVER_ERROR);
    }

    #[test]
    fn test_transport_error_uses_fallback() {
        let err = AppError::Transport("connection refused".to_string());
        assert_eq!(err.user_message("Network error"), "Network error");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_upload_error_exposes_phase_and_inner_message() {
        let err = AppError::Upload {
            phase: UploadPhase::Register,
            key: Some("uploads/a.png".to_string()),
            source: Box::new(ErrorResponse::into_app_error(
                404,
                r#"{"details":{"error":"Log not found"}}"#,
            )),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.user_message("Upload failed"), "Log not found");
        assert!(err.to_string().contains("register"));
    }
}
