//! Output formatting and writing utilities
//!
//! Results are printed as JSON, YAML or a human-readable rendering. Errors
//! are always rendered from the canonical `ClutchError` shape.

use crate::cli::OutputFormat;
use crate::error::Result;
use clutch_network::{ApiResponse, ClutchError};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Trait for formatting output with specialized support for common types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a successful response
    fn format_response(&self, response: &ApiResponse) -> Result<String>;

    /// Format a normalized error
    fn format_clutch_error(&self, error: &ClutchError) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::JsonPretty | OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_response(&self, response: &ApiResponse) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format!(
                "Status: {}\n{}",
                response.status,
                serde_json::to_string_pretty(&response.data)?
            )),
            _ => self.format(&response.data),
        }
    }

    fn format_clutch_error(&self, error: &ClutchError) -> Result<String> {
        match self {
            OutputFormat::Human => format_clutch_error_human(error),
            _ => self.format(error),
        }
    }
}

fn format_clutch_error_human(error: &ClutchError) -> Result<String> {
    let mut out = format!("{} {}\n", error.status.code, error.status.text);
    out.push_str(&format!("Message: {}\n", error.message));

    if let Some(code) = error.code {
        out.push_str(&format!("Code: {}\n", code));
    }
    if let Some(data) = &error.data {
        out.push_str("Data:\n");
        out.push_str(&serde_json::to_string_pretty(data)?);
        out.push('\n');
    }

    Ok(out)
}

/// Writes results and messages to stdout (or a custom writer)
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Disable progress indicators regardless of the terminal
    pub fn disable_progress(&mut self) {
        self.show_progress = false;
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content.trim_end_matches('\n'))?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a success message (human format only)
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message (human format only)
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write a serializable value in the selected format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.writeln(&formatted)
    }

    pub fn response(&mut self, response: &ApiResponse) -> Result<()> {
        let formatted = self.format.format_response(response)?;
        self.writeln(&formatted)
    }

    pub fn clutch_error(&mut self, error: &ClutchError) -> Result<()> {
        let formatted = self.format.format_clutch_error(error)?;
        if self.use_color && self.format == OutputFormat::Human {
            self.writeln(&formatted.red().to_string())
        } else {
            self.writeln(&formatted)
        }
    }

    /// Spinner for long-running operations, if progress is enabled
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(default_spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

pub fn default_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", " "])
}
