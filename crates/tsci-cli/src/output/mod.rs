//! Terminal output formatting and utilities.
//!
//! Human-readable messages go through `OutputHandler`; machine-readable
//! results are written to stdout untouched.

pub mod colors;
pub mod errors;

use serde::Serialize;
use tsci_core::error::{TsciError, TsciResult};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Output handler that never emits escape codes
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Access the color formatter
    pub fn colors(&self) -> &colors::ColorSupport {
        &self.colors
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        println!("{}", self.colors.dim(message));
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }

    /// Print a line of result data as is
    pub fn data(&self, line: &str) {
        println!("{}", line);
    }

    /// Print a value as pretty JSON
    pub fn json<T: Serialize>(&self, value: &T) -> TsciResult<()> {
        let rendered = render_json(value)?;
        println!("{}", rendered);
        Ok(())
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Pretty JSON rendering shared by `--json` output
pub fn render_json<T: Serialize>(value: &T) -> TsciResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| TsciError::io("Failed to encode JSON output".to_string(), e.into()))
}
