//! Request command handler

use crate::cli::RequestArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{redaction, timing::Timer};
use crate::output::OutputWriter;
use clutch_network::http::{parse_method, ApiRequest, RecordingNavigator, StaticLocation};
use clutch_network::ClutchClient;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Handle the request command
#[instrument(skip_all, fields(method = %args.method, path = %args.path))]
pub async fn handle_request(args: RequestArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let timer = Timer::with_details("request_command", &format!("{} {}", args.method, args.path));

    let request = build_request(&args)?;

    let mut client_config = config.client.clone();
    if let Some(base_url) = &args.base_url {
        client_config.base_url = base_url.clone();
    }
    if let Some(timeout) = args.timeout {
        client_config.timeout_secs = timeout;
    }

    let location = args
        .location
        .clone()
        .or_else(|| config.location.clone())
        .unwrap_or_else(|| "/".to_string());

    // A terminal cannot navigate; keep the target and print it instead.
    let navigator = Arc::new(RecordingNavigator::new());
    let client = ClutchClient::with_navigation(
        client_config,
        navigator.clone(),
        Arc::new(StaticLocation::new(location)),
    )?;

    info!(base_url = %client.config().base_url, "Sending request");

    let pb = if config.output.progress {
        output.spinner(&format!("{} {}", request.method, request.path))
    } else {
        None
    };

    let result = client.request(request).await;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    match result {
        Ok(response) => {
            debug!(
                status = response.status,
                elapsed_ms = timer.elapsed().as_millis() as u64,
                "Request succeeded"
            );
            output.response(&response)
        }
        Err(err) => {
            output.clutch_error(&err)?;
            if let Some(target) = navigator.last_target() {
                output.warning(&format!("Authentication required, log in at: {}", target))?;
            }
            Err(Error::Request(err))
        }
    }
}

/// Turn command-line arguments into an `ApiRequest`
fn build_request(args: &RequestArgs) -> Result<ApiRequest> {
    let method = parse_method(&args.method).map_err(|e| Error::invalid_args(e.to_string()))?;
    let mut request = ApiRequest::new(method, args.path.clone());

    if let Some(data) = &args.data {
        let body = serde_json::from_str(data)
            .map_err(|e| Error::invalid_args(format!("--data is not valid JSON: {}", e)))?;
        request = request.with_body(body);
    }

    for (key, value) in &args.query {
        request = request.with_query(key.clone(), value.clone());
    }

    for (name, value) in &args.headers {
        debug!(header = %name, value = %redaction::redact_header(name, value), "Adding header");
        request = request.with_header(name.clone(), value.clone());
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clutch_network::http::Method;
    use serde_json::json;

    fn args(method: &str, data: Option<&str>) -> RequestArgs {
        RequestArgs {
            method: method.to_string(),
            path: "/v1/things".to_string(),
            data: data.map(str::to_string),
            query: vec![("page".to_string(), "2".to_string())],
            headers: vec![("X-Trace".to_string(), "abc".to_string())],
            base_url: None,
            location: None,
            timeout: None,
        }
    }

    #[test]
    fn test_build_request() {
        let request = build_request(&args("put", Some(r#"{"name":"web"}"#))).unwrap();

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.body, Some(json!({ "name": "web" })));
        assert_eq!(request.query, vec![("page".to_string(), "2".to_string())]);
        assert_eq!(request.headers.get("X-Trace").map(String::as_str), Some("abc"));
    }

    #[test]
    fn test_invalid_method_and_body() {
        assert!(matches!(build_request(&args("BREW", None)), Err(Error::InvalidArgs(_))));
        assert!(matches!(build_request(&args("POST", Some("{oops"))), Err(Error::InvalidArgs(_))));
    }
}
