//! How CLI commands write their results.
//!
//! stdout carries the result (a report, a value, a listing) and nothing
//! else in JSON mode, so it can be piped into `jq`. Confirmations go to
//! stdout in text mode only; errors always go to stderr.

use serde::Serialize;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Output settings taken from the global `--json` / `--quiet` flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Output {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Output {
    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print a result: pretty JSON, or `text` rendered from it
    pub fn value<T, F>(&self, value: &T, text: F)
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        match self.format {
            OutputFormat::Text => println!("{}", text(value)),
            OutputFormat::Json => match serde_json::to_string_pretty(value) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to serialize output: {}", e),
            },
        }
    }

    /// Whether a confirmation line would be printed
    pub fn shows_notes(&self) -> bool {
        !self.quiet && !self.is_json()
    }

    /// Confirmation or progress line ("Start requested for Rust")
    pub fn note(&self, message: &str) {
        if self.shows_notes() {
            println!("{}", message);
        }
    }

    /// Error line on stderr, never suppressed
    pub fn error(&self, message: &str) {
        eprintln!("Error: {}", message);
    }
}

/// One line per start/stop control: whether the dashboard would enable it
pub fn format_gates(can_start: bool, can_stop: bool) -> String {
    let gate = |open: bool| if open { "available" } else { "blocked" };
    format!("  start    {}\n  stop     {}", gate(can_start), gate(can_stop))
}
