//! Response and transport-failure values seen by the interceptors

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A response read off the wire, body decoded as JSON where possible
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase, when the server sent a non-canonical one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,
    /// Response headers, lower-cased names
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Decoded body
    pub data: Value,
}

impl ApiResponse {
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            status_text: None,
            headers: HashMap::new(),
            data,
        }
    }

    pub fn with_status_text(mut self, text: impl Into<String>) -> Self {
        self.status_text = Some(text.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Read a reqwest response into an `ApiResponse`.
    ///
    /// Fails only when the body cannot be read; that counts as a transport
    /// failure since no usable response was obtained.
    pub async fn from_reqwest(response: reqwest::Response) -> Result<Self, TransportFailure> {
        let status = response.status().as_u16();

        // hyper keeps non-canonical reason phrases as a response extension
        let status_text = response
            .extensions()
            .get::<hyper::ext::ReasonPhrase>()
            .and_then(|phrase| std::str::from_utf8(phrase.as_bytes()).ok())
            .map(str::to_string);

        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_lowercase(), v.to_string()))
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(TransportFailure::from_reqwest)?;

        Ok(Self {
            status,
            status_text,
            headers,
            data: decode_body(&body),
        })
    }
}

/// Decode a body: empty → `null`, JSON → value, anything else → raw text
pub fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }

    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

/// A failed exchange as reported by the transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportFailure {
    /// The transport's own description of the failure
    pub message: String,
    /// The response, if the server answered at all
    pub response: Option<ApiResponse>,
}

impl TransportFailure {
    /// A failure with no response (timeout, DNS, refused connection...)
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            response: None,
        }
    }

    /// A response rejected by status validation
    pub fn status(response: ApiResponse) -> Self {
        Self {
            message: format!("Request failed with status code {}", response.status),
            response: Some(response),
        }
    }

    /// A failure with a response and a caller-supplied message
    pub fn with_response(message: impl Into<String>, response: ApiResponse) -> Self {
        Self {
            message: message.into(),
            response: Some(response),
        }
    }

    pub fn from_reqwest(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("Request timed out: {}", error)
        } else if error.is_connect() {
            format!("Connection failed: {}", error)
        } else {
            error.to_string()
        };

        Self::network(message)
    }
}
