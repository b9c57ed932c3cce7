//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod config;
mod request;

pub use config::handle_config;
pub use request::handle_request;

use crate::cli::{LoginUrlArgs, StatusTextArgs};
use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use clutch_network::http::{login_redirect_target, resolve_status_text};
use serde_json::json;

/// Handle the login-url command
pub fn handle_login_url(args: LoginUrlArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let target = login_redirect_target(&config.client.login_path, &args.location);

    match output.format() {
        crate::cli::OutputFormat::Human => output.writeln(&target),
        _ => output.data(&json!({ "location": args.location, "redirect": target })),
    }
}

/// Handle the status-text command
pub fn handle_status_text(args: StatusTextArgs, output: &mut OutputWriter) -> Result<()> {
    let text = resolve_status_text(args.code, None);

    match output.format() {
        crate::cli::OutputFormat::Human => output.writeln(&text),
        _ => output.data(&json!({ "code": args.code, "text": text })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn writer(format: OutputFormat) -> (OutputWriter, SharedBuf) {
        let buf = SharedBuf::default();
        (OutputWriter::with_writer(format, false, false, Box::new(buf.clone())), buf)
    }

    fn contents(buf: &SharedBuf) -> String {
        String::from_utf8(buf.0.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_login_url_human() {
        let (mut output, buf) = writer(OutputFormat::Human);
        let args = LoginUrlArgs {
            location: "/example?foo=bar".to_string(),
        };

        handle_login_url(args, &Config::default(), &mut output).unwrap();

        assert_eq!(
            contents(&buf),
            "/v1/authn/login?redirect_url=%2Fexample%3Ffoo%3Dbar\n"
        );
    }

    #[test]
    fn test_status_text_json() {
        let (mut output, buf) = writer(OutputFormat::Json);

        handle_status_text(StatusTextArgs { code: 429 }, &mut output).unwrap();

        assert_eq!(contents(&buf), "{\"code\":429,\"text\":\"Too Many Requests\"}\n");
    }

    #[test]
    fn test_status_text_unknown() {
        let (mut output, buf) = writer(OutputFormat::Human);

        handle_status_text(StatusTextArgs { code: 299 }, &mut output).unwrap();

        assert_eq!(contents(&buf), "Unknown Error\n");
    }
}
