//! Success-path classification
//!
//! The API proxy answers 200 even when the upstream call failed, embedding
//! the real status in the body:
//!
//! ```json
//! { "httpStatus": 404, "response": { "message": "Item not found" }, "headers": {} }
//! ```
//!
//! [`classify_response`] turns such responses into a [`ClutchError`] and
//! passes everything else through untouched.

use serde_json::Value;

use crate::http::error::{ClutchError, ErrorStatus};
use crate::http::response::ApiResponse;
use crate::http::status::{resolve_status_text, status_text};

/// Embedded failure found in a proxied response body
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyEnvelope<'a> {
    pub http_status: u16,
    pub message: Option<&'a str>,
}

impl<'a> ProxyEnvelope<'a> {
    /// Extract an embedded failure, if the body carries one.
    ///
    /// Bodies without an integer `httpStatus`, or with one below 400, are
    /// not failures.
    pub fn failure(data: &'a Value) -> Option<Self> {
        let http_status = data
            .get("httpStatus")
            .and_then(Value::as_u64)
            .and_then(|s| u16::try_from(s).ok())?;

        if http_status < 400 {
            return None;
        }

        let message = data
            .get("response")
            .and_then(|r| r.get("message"))
            .and_then(Value::as_str);

        Some(Self {
            http_status,
            message,
        })
    }
}

/// Pass the response through, or reject it if it wraps a proxied failure
pub fn classify_response(response: ApiResponse) -> Result<ApiResponse, ClutchError> {
    let Some(envelope) = ProxyEnvelope::failure(&response.data) else {
        return Ok(response);
    };

    // The transport's phrase describes the proxy's 200, not the embedded status.
    let text = status_text(envelope.http_status)
        .map(str::to_string)
        .unwrap_or_else(|| resolve_status_text(envelope.http_status, response.status_text.as_deref()));

    let message = envelope.message.map(str::to_string).unwrap_or_else(|| text.clone());

    Err(ClutchError::new(ErrorStatus::new(envelope.http_status, text), message)
        .with_data(response.data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn proxied(data: Value) -> ApiResponse {
        ApiResponse::new(200, data).with_status_text("Not Found")
    }

    #[test]
    fn test_embedded_404_is_rejected() {
        let data = json!({
            "httpStatus": 404,
            "headers": { "Cache-Control": ["no-cache"] },
            "response": { "message": "Item not found" },
        });

        let err = classify_response(proxied(data.clone())).unwrap_err();
        assert_eq!(
            err,
            ClutchError::new(ErrorStatus::new(404, "Not Found"), "Item not found").with_data(data)
        );
    }

    #[test]
    fn test_missing_http_status_passes_through() {
        let response = proxied(json!({ "items": [1, 2, 3] }));
        assert_eq!(classify_response(response.clone()), Ok(response));
    }

    #[test]
    fn test_status_boundary() {
        let ok = proxied(json!({ "httpStatus": 399 }));
        assert!(classify_response(ok).is_ok());

        let err = classify_response(proxied(json!({ "httpStatus": 400 }))).unwrap_err();
        assert_eq!(err.status, ErrorStatus::new(400, "Bad Request"));
    }

    #[test]
    fn test_non_integer_http_status_passes_through() {
        assert!(classify_response(proxied(json!({ "httpStatus": "500" }))).is_ok());
        assert!(classify_response(proxied(json!("plain text body"))).is_ok());
        assert!(classify_response(proxied(Value::Null)).is_ok());
    }

    #[test]
    fn test_unknown_embedded_status_uses_response_text() {
        let err = classify_response(proxied(json!({
            "httpStatus": 499,
            "response": { "message": "client closed request" },
        })))
        .unwrap_err();
        assert_eq!(err.status, ErrorStatus::new(499, "Not Found"));

        let bare = ApiResponse::new(200, json!({ "httpStatus": 499 }));
        let err = classify_response(bare).unwrap_err();
        assert_eq!(err.status, ErrorStatus::new(499, "Unknown Error"));
        assert_eq!(err.message, "Unknown Error");
    }
}
