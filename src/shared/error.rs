//! Strict error handling with the AppError enum
//!
//! All errors are serializable for IPC communication with the frontend.

use serde::Serialize;
use thiserror::Error;

/// Application errors
///
/// Every fallible operation in the client surfaces one of these variants.
/// All variants are serializable so the frontend can render them directly.
#[derive(Error, Debug, Clone, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Invalid input or a violated local precondition. Raised before any
    /// network request is issued.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Request never reached the backend (connection failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// Backend responded with a non-success status other than 401.
    /// The message is the flattened error body.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Backend responded 401. Surfaced as a sign-in prompt, never as a
    /// generic error.
    #[error("Authentication required: {0}")]
    Auth(String),

    /// System I/O error (settings file, keyring).
    #[error("System I/O error: {0}")]
    Io(String),

    /// Unknown/unexpected error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<keyring::Error> for AppError {
    fn from(err: keyring::Error) -> Self {
        AppError::Io(format!("Keyring error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Flatten an HTTP error body into one human-readable string.
///
/// The backend is not consistent about its error shape: FastAPI validation
/// errors use `detail`, some handlers use `message` or `error`, and a few
/// return plain text. Known fields are tried in order; the raw body is the
/// degraded fallback.
pub fn flatten_error_body(body: &str) -> String {
    if body.trim().is_empty() {
        return "An unexpected error occurred".to_string();
    }

    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => {
            for field in ["detail", "message", "error"] {
                match value.get(field) {
                    Some(serde_json::Value::String(s)) => return s.clone(),
                    Some(other) if !other.is_null() => return other.to_string(),
                    _ => {}
                }
            }
            value.to_string()
        }
        Err(_) => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_fastapi_detail_field() {
        let body = r#"{"detail": "Conversation ID is required to refine translation"}"#;
        assert_eq!(
            flatten_error_body(body),
            "Conversation ID is required to refine translation"
        );
    }

    #[test]
    fn flattens_message_field() {
        let body = r#"{"message": "quota exceeded"}"#;
        assert_eq!(flatten_error_body(body), "quota exceeded");
    }

    #[test]
    fn flattens_error_field() {
        let body = r#"{"error": "boom"}"#;
        assert_eq!(flatten_error_body(body), "boom");
    }

    #[test]
    fn non_string_detail_is_serialized() {
        let body = r#"{"detail": [{"loc": ["body", "message"], "msg": "field required"}]}"#;
        let flat = flatten_error_body(body);
        assert!(flat.contains("field required"));
    }

    #[test]
    fn unknown_shape_falls_back_to_whole_body() {
        let body = r#"{"odd": "shape"}"#;
        assert_eq!(flatten_error_body(body), r#"{"odd":"shape"}"#);
    }

    #[test]
    fn plain_text_body_is_passed_through() {
        assert_eq!(flatten_error_body("Service Unavailable"), "Service Unavailable");
    }

    #[test]
    fn empty_body_gets_generic_message() {
        assert_eq!(flatten_error_body("  "), "An unexpected error occurred");
    }
}
