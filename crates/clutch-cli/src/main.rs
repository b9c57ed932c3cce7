//! Clutch CLI - command-line client for Clutch APIs
//!
//! Sends requests through the Clutch request client and prints either the
//! response or the normalized `ClutchError`.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    control::set_override(cli.use_color());

    let result = run(cli).await;

    match result {
        Ok(()) => process::exit(0),
        Err(e) => {
            // Request failures were already rendered by the handler
            if !matches!(e, error::Error::Request(_)) {
                eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));
            }

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<()> {
    let config = Config::load_with_file(cli.config.as_deref())?;

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    execute(cli, config).await
}

#[instrument(skip_all, fields(command = ?cli.command))]
async fn execute(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, cli.use_color() && config.output.color, cli.quiet);
    if !config.output.progress {
        output.disable_progress();
    }

    tracing::info!(verbosity = cli.verbosity_level(), "Executing command");

    match cli.command {
        Commands::Request(args) => handlers::handle_request(args, &config, &mut output).await,
        Commands::LoginUrl(args) => handlers::handle_login_url(args, &config, &mut output),
        Commands::StatusText(args) => handlers::handle_status_text(args, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.merge(&config.logging);

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["clutch", "login-url", "/example?foo=bar"]);
        assert_eq!(cli.verbosity_level(), 0);
        assert!(matches!(cli.command, Commands::LoginUrl(_)));

        let cli = Cli::parse_from(["clutch", "-vv", "request", "GET", "/v1/healthcheck"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["clutch", "--quiet", "config", "show"]);
        assert!(cli.quiet);
    }
}
