//! Failure-path translation
//!
//! Every failure the transport can produce is funnelled through here and
//! comes out as a [`ClutchError`]. The failure is classified once into a
//! [`FailureKind`]; each branch then works on an already validated shape.
//!
//! A 401 additionally produces a login redirect. The redirect target and the
//! error are computed independently ([`redirect_target`] and
//! [`to_clutch_error`]); [`ErrorInterceptor`] issues the navigation and then
//! hands back the error.

use serde_json::Value;
use std::sync::Arc;

use crate::http::error::{ClutchError, ErrorStatus};
use crate::http::navigation::{login_redirect_target, LocationProvider, Navigator};
use crate::http::response::{ApiResponse, TransportFailure};
use crate::http::status::resolve_status_text;

/// Error body following the `{ code, message }` convention, or anything else
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorPayload<'a> {
    /// `{ code: integer, message: string }`
    Structured { code: i64, message: &'a str },
    /// Any other body, including an empty one
    Unstructured(&'a Value),
}

impl<'a> ErrorPayload<'a> {
    pub fn classify(data: &'a Value) -> Self {
        let code = data.get("code").and_then(Value::as_i64);
        let message = data.get("message").and_then(Value::as_str);

        match (code, message) {
            (Some(code), Some(message)) => ErrorPayload::Structured { code, message },
            _ => ErrorPayload::Unstructured(data),
        }
    }
}

/// Shape of a transport failure
#[derive(Debug, Clone, PartialEq)]
pub enum FailureKind<'a> {
    /// No response was obtained
    Transport { message: &'a str },
    /// 401: the session must be re-established
    Unauthorized(&'a ApiResponse),
    /// Any other error response
    Response(&'a ApiResponse),
}

impl<'a> FailureKind<'a> {
    pub fn classify(failure: &'a TransportFailure) -> Self {
        match &failure.response {
            None => FailureKind::Transport {
                message: &failure.message,
            },
            Some(response) if response.status == 401 => FailureKind::Unauthorized(response),
            Some(response) => FailureKind::Response(response),
        }
    }
}

/// Build the canonical error for a transport failure. No side effects.
pub fn to_clutch_error(failure: &TransportFailure) -> ClutchError {
    match FailureKind::classify(failure) {
        FailureKind::Transport { message } => ClutchError::client_error(message),
        FailureKind::Unauthorized(response) | FailureKind::Response(response) => {
            response_error(response, &failure.message)
        }
    }
}

/// Login redirect the failure calls for, if any. No side effects.
pub fn redirect_target(
    failure: &TransportFailure,
    login_path: &str,
    location: &dyn LocationProvider,
) -> Option<String> {
    match FailureKind::classify(failure) {
        FailureKind::Unauthorized(_) => Some(login_redirect_target(
            login_path,
            &location.current_location(),
        )),
        FailureKind::Transport { .. } | FailureKind::Response(_) => None,
    }
}

fn response_error(response: &ApiResponse, failure_message: &str) -> ClutchError {
    let status = ErrorStatus::new(
        response.status,
        resolve_status_text(response.status, response.status_text.as_deref()),
    );

    match ErrorPayload::classify(&response.data) {
        ErrorPayload::Structured { code, message } => {
            ClutchError::new(status, message).with_code(code)
        }
        ErrorPayload::Unstructured(raw) => {
            ClutchError::new(status, failure_message).with_data(raw.clone())
        }
    }
}

/// Failure-path interceptor wired into the client
#[derive(Clone)]
pub struct ErrorInterceptor {
    navigator: Arc<dyn Navigator>,
    location: Arc<dyn LocationProvider>,
    login_path: String,
}

impl ErrorInterceptor {
    pub fn new(
        navigator: Arc<dyn Navigator>,
        location: Arc<dyn LocationProvider>,
        login_path: impl Into<String>,
    ) -> Self {
        Self {
            navigator,
            location,
            login_path: login_path.into(),
        }
    }

    /// Translate a failure, navigating to the login page first on a 401.
    ///
    /// The navigation is fire-and-forget; the error is returned regardless.
    pub fn intercept(&self, failure: TransportFailure) -> ClutchError {
        if let Some(target) = redirect_target(&failure, &self.login_path, self.location.as_ref()) {
            tracing::debug!(redirect = %target, "Received 401, redirecting to login");
            self.navigator.navigate(&target);
        }

        let error = to_clutch_error(&failure);
        tracing::debug!(
            status = error.status.code,
            code = ?error.code,
            message = %error.message,
            "Translated transport failure"
        );
        error
    }
}

impl std::fmt::Debug for ErrorInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorInterceptor")
            .field("login_path", &self.login_path)
            .finish_non_exhaustive()
    }
}
