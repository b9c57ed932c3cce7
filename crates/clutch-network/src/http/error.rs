//! The canonical error returned to every caller
//!
//! Transport failures, HTTP error statuses and proxy-embedded failures all
//! end up as a [`ClutchError`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::http::status::{CLIENT_ERROR_CODE, CLIENT_ERROR_TEXT};

/// HTTP status code paired with its reason phrase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorStatus {
    pub code: u16,
    pub text: String,
}

impl ErrorStatus {
    pub fn new(code: u16, text: impl Into<String>) -> Self {
        Self {
            code,
            text: text.into(),
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.text)
    }
}

/// Normalized error value for a failed API call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ClutchError {
    /// HTTP status and reason phrase
    pub status: ErrorStatus,
    /// Human-readable description of the failure
    pub message: String,
    /// Application-defined code from a structured error payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    /// Original payload, kept for diagnostics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ClutchError {
    pub fn new(status: ErrorStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
            data: None,
        }
    }

    /// Error for a request that never produced a response.
    ///
    /// The real cause is opaque to the client, so a generic 500 "Client
    /// Error" status is reported alongside the transport's own message.
    pub fn client_error(message: impl Into<String>) -> Self {
        Self::new(ErrorStatus::new(CLIENT_ERROR_CODE, CLIENT_ERROR_TEXT), message)
    }

    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn status_code(&self) -> u16 {
        self.status.code
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status.code == 401
    }

    pub fn is_not_found(&self) -> bool {
        self.status.code == 404
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_error_shape() {
        let err = ClutchError::client_error("Request timeout of 1ms reached");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({
                "status": { "code": 500, "text": "Client Error" },
                "message": "Request timeout of 1ms reached",
            })
        );
    }

    #[test]
    fn test_optional_fields_serialize_when_present() {
        let err = ClutchError::new(ErrorStatus::new(404, "Not Found"), "Could not find resource")
            .with_code(5)
            .with_data(json!({ "extra": true }));

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["code"], 5);
        assert_eq!(value["data"]["extra"], true);
    }

    #[test]
    fn test_deserialize_without_optional_fields() {
        let err: ClutchError = serde_json::from_value(json!({
            "status": { "code": 403, "text": "Forbidden" },
            "message": "nope",
        }))
        .unwrap();
        assert_eq!(err.code, None);
        assert_eq!(err.data, None);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_display() {
        let err = ClutchError::new(ErrorStatus::new(404, "Not Found"), "Item not found");
        assert_eq!(err.to_string(), "404 Not Found: Item not found");
        assert!(err.is_not_found());
        assert!(!err.is_unauthorized());
    }
}
