//! Request client for Clutch APIs
//!
//! This module provides:
//! - The canonical [`ClutchError`] and the status text table
//! - Success-path classification of proxy-embedded failures
//! - Failure-path translation with the login redirect on 401
//! - The configured [`ClutchClient`] wiring both onto reqwest

pub mod builder;
pub mod classifier;
pub mod client;
pub mod error;
pub mod navigation;
pub mod response;
pub mod status;
pub mod translator;

pub use builder::{parse_method, ApiRequest, RequestBuilder};
pub use classifier::{classify_response, ProxyEnvelope};
pub use client::{validate_status, ClientConfig, ClutchClient};
pub use error::{ClutchError, ErrorStatus};
pub use navigation::{
    encode_uri_component, login_redirect_target, LocationProvider, Navigator,
    RecordingNavigator, StaticLocation, TracingNavigator, DEFAULT_LOGIN_PATH,
};
pub use response::{ApiResponse, TransportFailure};
pub use status::{resolve_status_text, status_text};
pub use translator::{redirect_target, to_clutch_error, ErrorInterceptor, ErrorPayload, FailureKind};

// Re-export commonly used types
pub use reqwest::Method;
