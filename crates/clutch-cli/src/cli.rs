//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Clutch CLI - issue Clutch API requests and inspect normalized errors
#[derive(Parser, Debug)]
#[command(
    name = "clutch",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "CLUTCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a request through the Clutch client
    Request(RequestArgs),

    /// Print the login redirect URL for a page location
    LoginUrl(LoginUrlArgs),

    /// Print the canonical reason phrase for a status code
    StatusText(StatusTextArgs),

    /// Manage configuration files and settings
    Config(ConfigArgs),
}

/// Arguments for the request command
#[derive(Parser, Debug)]
pub struct RequestArgs {
    /// HTTP method (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS)
    #[arg(value_name = "METHOD")]
    pub method: String,

    /// Request path, joined onto the configured base URL
    #[arg(value_name = "PATH")]
    pub path: String,

    /// JSON request body
    #[arg(short, long, value_name = "JSON")]
    pub data: Option<String>,

    /// Query parameter as key=value (repeatable)
    #[arg(long = "query", value_name = "KEY=VALUE", value_parser = parse_key_value::<'='>)]
    pub query: Vec<(String, String)>,

    /// Request header as name:value (repeatable)
    #[arg(short = 'H', long = "header", value_name = "NAME:VALUE", value_parser = parse_key_value::<':'>)]
    pub headers: Vec<(String, String)>,

    /// Base URL override
    #[arg(long, env = "CLUTCH_BASE_URL")]
    pub base_url: Option<String>,

    /// Page location reported as the post-login return target
    #[arg(long)]
    pub location: Option<String>,

    /// Timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Arguments for the login-url command
#[derive(Parser, Debug)]
pub struct LoginUrlArgs {
    /// Current path plus query string, e.g. /example?foo=bar
    #[arg(value_name = "LOCATION")]
    pub location: String,
}

/// Arguments for the status-text command
#[derive(Parser, Debug)]
pub struct StatusTextArgs {
    /// HTTP status code
    #[arg(value_name = "CODE")]
    pub code: u16,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a default configuration file
    Init(ConfigInitArgs),

    /// Show the effective configuration
    Show,
}

/// Arguments for config init
#[derive(Parser, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (defaults to the user config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Force overwrite existing config files
    #[arg(long)]
    pub force: bool,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Pretty-printed JSON output
    JsonPretty,
}

/// Split `key<SEP>value`, trimming whitespace around both halves
fn parse_key_value<const SEP: char>(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once(SEP)
        .ok_or_else(|| format!("expected KEY{}VALUE, got '{}'", SEP, raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }

    Ok((key.to_string(), value.trim().to_string()))
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}
