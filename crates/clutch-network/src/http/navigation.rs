//! Navigation capabilities used by the authentication redirect
//!
//! The translator never reads ambient location state or performs navigation
//! itself. Both are injected:
//! - [`LocationProvider`] reports the current path and query string
//! - [`Navigator`] performs a fire-and-forget navigation to a target URL

use std::sync::Mutex;

/// Default login route of the Clutch backend
pub const DEFAULT_LOGIN_PATH: &str = "/v1/authn/login";

/// Characters `encodeURIComponent` leaves alone beyond the ones `urlencoding` keeps
const EXTRA_UNRESERVED: &[char] = &['!', '*', '\'', '(', ')'];

/// Trait for reading the location of the page that issued a request
pub trait LocationProvider: Send + Sync {
    /// Current path plus query string, e.g. `/example?foo=bar`
    fn current_location(&self) -> String;
}

/// Trait for sending the user somewhere else
pub trait Navigator: Send + Sync {
    /// Navigate to `target`. Not awaited; repeated calls are harmless.
    fn navigate(&self, target: &str);
}

/// Location provider returning a fixed value
#[derive(Debug, Clone, Default)]
pub struct StaticLocation {
    location: String,
}

impl StaticLocation {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl LocationProvider for StaticLocation {
    fn current_location(&self) -> String {
        if self.location.is_empty() {
            "/".to_string()
        } else {
            self.location.clone()
        }
    }
}

/// Navigator that only reports the target through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, target: &str) {
        tracing::warn!(target_url = %target, "Authentication required, navigating to login");
    }
}

/// Navigator that remembers every target it was sent to
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    targets: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All targets, oldest first
    pub fn targets(&self) -> Vec<String> {
        self.targets
            .lock()
            .map(|targets| targets.clone())
            .unwrap_or_default()
    }

    /// Most recent target
    pub fn last_target(&self) -> Option<String> {
        self.targets
            .lock()
            .ok()
            .and_then(|targets| targets.last().cloned())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        tracing::debug!(target_url = %target, "Recording navigation");
        if let Ok(mut targets) = self.targets.lock() {
            targets.push(target.to_string());
        }
    }
}

/// Percent-encode a string the way JavaScript's `encodeURIComponent` does
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = String::with_capacity(input.len());
    let mut buf = [0u8; 4];

    for ch in input.chars() {
        if EXTRA_UNRESERVED.contains(&ch) {
            encoded.push(ch);
        } else {
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    encoded
}

/// Build the login URL that returns the user to `location` afterwards
pub fn login_redirect_target(login_path: &str, location: &str) -> String {
    format!("{}?redirect_url={}", login_path, encode_uri_component(location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_redirect_target() {
        assert_eq!(
            login_redirect_target(DEFAULT_LOGIN_PATH, "/example?foo=bar"),
            "/v1/authn/login?redirect_url=%2Fexample%3Ffoo%3Dbar"
        );
    }

    #[test]
    fn test_encode_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("a-b_c.d~e"), "a-b_c.d~e");
        assert_eq!(encode_uri_component("!*'()"), "!*'()");
        assert_eq!(encode_uri_component("a b&c=d#e"), "a%20b%26c%3Dd%23e");
        assert_eq!(encode_uri_component("/k8s/pods?q=x,y"), "%2Fk8s%2Fpods%3Fq%3Dx%2Cy");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("100%"), "100%25");
    }

    #[test]
    fn test_static_location_defaults_to_root() {
        assert_eq!(StaticLocation::default().current_location(), "/");
        assert_eq!(StaticLocation::new("/a?b=c").current_location(), "/a?b=c");
    }

    #[test]
    fn test_recording_navigator() {
        let navigator = RecordingNavigator::new();
        assert_eq!(navigator.last_target(), None);

        navigator.navigate("/first");
        navigator.navigate("/second");

        assert_eq!(navigator.targets(), vec!["/first", "/second"]);
        assert_eq!(navigator.last_target().as_deref(), Some("/second"));
    }
}
