//! The configured request client
//!
//! Wires the status-validation rule and both interceptors around reqwest:
//! - status < 400: [`classify_response`] may still reject a proxied failure
//! - status >= 400 or no response: [`ErrorInterceptor`] always rejects

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::http::builder::{ApiRequest, RequestBuilder};
use crate::http::classifier::classify_response;
use crate::http::error::ClutchError;
use crate::http::navigation::{
    LocationProvider, Navigator, StaticLocation, TracingNavigator, DEFAULT_LOGIN_PATH,
};
use crate::http::response::{ApiResponse, TransportFailure};
use crate::http::translator::ErrorInterceptor;
use crate::{Error, Result};

/// Whether a status code counts as a successful exchange
pub fn validate_status(status: u16) -> bool {
    status < 400
}

/// Configuration for the request client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every request path; a path on it is kept, so
    /// `https://host/api` plus `/v1/x` is `https://host/api/v1/x`
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Login route used for the 401 redirect
    pub login_path: String,
    /// Headers sent with every request
    pub default_headers: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 30,
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            default_headers: HashMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_login_path(mut self, login_path: impl Into<String>) -> Self {
        self.login_path = login_path.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.base_url).map_err(|e| Error::Configuration {
            message: format!("Invalid base_url '{}'", self.base_url),
            source: Some(anyhow::Error::new(e)),
        })?;

        if url.cannot_be_a_base() {
            return Err(Error::configuration(format!(
                "base_url '{}' cannot be used as a base",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(Error::configuration("timeout_secs must be greater than zero"));
        }

        if !self.login_path.starts_with('/') {
            return Err(Error::configuration(format!(
                "login_path '{}' must start with '/'",
                self.login_path
            )));
        }

        Ok(())
    }
}

/// Request client whose every failure is a [`ClutchError`]
#[derive(Debug, Clone)]
pub struct ClutchClient {
    client: reqwest::Client,
    request_builder: RequestBuilder,
    interceptor: ErrorInterceptor,
    config: ClientConfig,
}

impl ClutchClient {
    /// Client that logs auth redirects instead of navigating anywhere
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_navigation(
            config,
            Arc::new(TracingNavigator),
            Arc::new(StaticLocation::default()),
        )
    }

    pub fn with_navigation(
        config: ClientConfig,
        navigator: Arc<dyn Navigator>,
        location: Arc<dyn LocationProvider>,
    ) -> Result<Self> {
        config.validate()?;

        // Status validation happens here, not in reqwest
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::HttpRequest {
                message: format!("Failed to create HTTP client: {}", e),
                source: Some(Box::new(e)),
            })?;

        let request_builder = RequestBuilder::new(&config.base_url, config.default_headers.clone())?;
        let interceptor = ErrorInterceptor::new(navigator, location, config.login_path.clone());

        Ok(Self {
            client,
            request_builder,
            interceptor,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Issue a request and classify the outcome
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, request: ApiRequest) -> std::result::Result<ApiResponse, ClutchError> {
        match self.exchange(&request).await {
            Ok(response) if validate_status(response.status) => {
                tracing::debug!(status = response.status, "Response accepted");
                classify_response(response).inspect_err(|err| {
                    tracing::warn!(status = err.status.code, "Proxied call failed upstream");
                })
            }
            Ok(response) => Err(self.interceptor.intercept(TransportFailure::status(response))),
            Err(failure) => Err(self.interceptor.intercept(failure)),
        }
    }

    pub async fn get(&self, path: &str) -> std::result::Result<ApiResponse, ClutchError> {
        self.request(ApiRequest::get(path)).await
    }

    pub async fn post(&self, path: &str, body: Value) -> std::result::Result<ApiResponse, ClutchError> {
        self.request(ApiRequest::post(path, body)).await
    }

    pub async fn put(&self, path: &str, body: Value) -> std::result::Result<ApiResponse, ClutchError> {
        self.request(ApiRequest::put(path, body)).await
    }

    pub async fn delete(&self, path: &str) -> std::result::Result<ApiResponse, ClutchError> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Send the request and read the response, whatever its status
    async fn exchange(&self, request: &ApiRequest) -> std::result::Result<ApiResponse, TransportFailure> {
        let built = self
            .request_builder
            .build_request(&self.client, request)
            .map_err(|e| TransportFailure::network(e.to_string()))?;

        tracing::debug!(url = %built.url(), "Sending request");

        let response = self
            .client
            .execute(built)
            .await
            .map_err(TransportFailure::from_reqwest)?;

        ApiResponse::from_reqwest(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_status_boundary() {
        assert!(validate_status(200));
        assert!(validate_status(302));
        assert!(validate_status(399));
        assert!(!validate_status(400));
        assert!(!validate_status(500));
    }

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.login_path, "/v1/authn/login");
        assert!(config.default_headers.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{ "base_url": "https://clutch.example.com" }"#).unwrap();
        assert_eq!(config.base_url, "https://clutch.example.com");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_config_validation() {
        assert!(ClientConfig::default().with_base_url("nope").validate().is_err());
        assert!(ClientConfig::default().with_base_url("mailto:a@b.c").validate().is_err());
        assert!(ClientConfig::default().with_timeout_secs(0).validate().is_err());
        assert!(ClientConfig::default().with_login_path("login").validate().is_err());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let result = ClutchClient::new(ClientConfig::default().with_timeout_secs(0));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_client_keeps_config() {
        let config = ClientConfig::default().with_header("X-Clutch", "1");
        let client = ClutchClient::new(config.clone()).unwrap();
        assert_eq!(client.config(), &config);
    }
}
