//! Request descriptions and their translation into reqwest requests

use reqwest::{Method, Url};
use serde_json::Value;
use std::collections::HashMap;

use crate::{Error, Result};

/// Description of an API call, independent of the transport
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::PATCH, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Parse an HTTP method from its name, case-insensitively
pub fn parse_method(method_str: &str) -> Result<Method> {
    match method_str.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        "HEAD" => Ok(Method::HEAD),
        "OPTIONS" => Ok(Method::OPTIONS),
        _ => Err(Error::http_request(format!("Unsupported HTTP method: {}", method_str))),
    }
}

/// Builds reqwest requests against a fixed base URL
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    headers: HashMap<String, String>,
}

impl RequestBuilder {
    pub fn new(base_url: &str, headers: HashMap<String, String>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| Error::HttpRequest {
            message: format!("Invalid base URL: {}", base_url),
            source: Some(Box::new(e)),
        })?;

        Ok(Self { base_url, headers })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request for `request` using `client`
    pub fn build_request(
        &self,
        client: &reqwest::Client,
        request: &ApiRequest,
    ) -> Result<reqwest::Request> {
        let url = self.build_url(&request.path)?;

        let mut builder = client.request(request.method.clone(), url);

        // Per-request headers override the defaults
        for (key, value) in &self.headers {
            if !request.headers.keys().any(|k| k.eq_ignore_ascii_case(key)) {
                builder = builder.header(key, value);
            }
        }
        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        // .json() also sets Content-Type: application/json
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        builder.build().map_err(|e| Error::HttpRequest {
            message: format!("Failed to build request: {}", e),
            source: Some(Box::new(e)),
        })
    }

    /// Append `path` to the base URL, keeping any path prefix on the base.
    ///
    /// Absolute URLs are used as they are.
    fn build_url(&self, path: &str) -> Result<Url> {
        if let Ok(url) = Url::parse(path) {
            return Ok(url);
        }

        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        Url::parse(&joined).map_err(|e| Error::HttpRequest {
            message: format!("Failed to join path: {}", path),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn builder() -> RequestBuilder {
        RequestBuilder::new(
            "https://clutch.example.com",
            HashMap::from([("X-Client".to_string(), "clutch".to_string())]),
        )
        .unwrap()
    }

    #[test]
    fn test_build_get_request() {
        let client = reqwest::Client::new();
        let request = ApiRequest::get("/v1/k8s/describePod").with_query("name", "web-0");

        let built = builder().build_request(&client, &request).unwrap();

        assert_eq!(built.method(), &Method::GET);
        assert_eq!(
            built.url().as_str(),
            "https://clutch.example.com/v1/k8s/describePod?name=web-0"
        );
        assert_eq!(built.headers()["x-client"], "clutch");
        assert!(built.body().is_none());
    }

    #[test]
    fn test_build_json_body() {
        let client = reqwest::Client::new();
        let request = ApiRequest::post("/v1/resolver/search", json!({ "query": "pod" }))
            .with_header("X-Client", "override");

        let built = builder().build_request(&client, &request).unwrap();

        assert_eq!(built.method(), &Method::POST);
        assert_eq!(built.headers()["content-type"], "application/json");
        assert_eq!(built.headers()["x-client"], "override");
        assert_eq!(
            built.body().and_then(|b| b.as_bytes()),
            Some(br#"{"query":"pod"}"#.as_slice())
        );
    }

    #[test]
    fn test_base_url_path_prefix_is_kept() {
        let client = reqwest::Client::new();

        for base in ["https://clutch.example.com/api", "https://clutch.example.com/api/"] {
            let builder = RequestBuilder::new(base, HashMap::new()).unwrap();
            for path in ["/v1/x", "v1/x"] {
                let built = builder.build_request(&client, &ApiRequest::get(path)).unwrap();
                assert_eq!(built.url().as_str(), "https://clutch.example.com/api/v1/x");
            }
        }
    }

    #[test]
    fn test_absolute_path_bypasses_base_url() {
        let client = reqwest::Client::new();
        let request = ApiRequest::get("https://other.example.com/healthcheck");

        let built = builder().build_request(&client, &request).unwrap();
        assert_eq!(built.url().as_str(), "https://other.example.com/healthcheck");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = RequestBuilder::new("not a url", HashMap::new());
        assert!(matches!(result, Err(Error::HttpRequest { .. })));
    }

    #[test]
    fn test_parse_method() {
        assert_eq!(parse_method("get").unwrap(), Method::GET);
        assert_eq!(parse_method("Patch").unwrap(), Method::PATCH);
        assert!(parse_method("BREW").is_err());
    }
}
