//! Error message formatting with actionable suggestions.

use tsci_core::error::TsciError;
use super::colors::ColorSupport;
use std::error::Error;

/// Error formatter with suggestions
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    /// Create a new error formatter
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    #[cfg(test)]
    fn with_colors(colors: ColorSupport) -> Self {
        Self { colors }
    }

    /// Format an error with its hint and source chain
    pub fn format_error(&self, error: &TsciError) -> String {
        let mut output = String::new();

        output.push_str(&self.colors.red("error"));
        output.push_str(": ");
        output.push_str(&error.to_string());

        if let Some(suggestion) = error.root_cause().suggestion() {
            output.push_str("\n\n");
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
        }

        // The operation wrapper already prints its inner message
        let mut source = match error {
            TsciError::Operation { source, .. } => source.source(),
            other => other.source(),
        };
        while let Some(err) = source {
            output.push('\n');
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            source = err.source();
        }

        output
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_has_hint() {
        let err = TsciError::PackageNotFound {
            name: "red-led".to_string(),
        }
        .in_operation("get package details");

        let formatted = ErrorFormatter::with_colors(ColorSupport::disabled()).format_error(&err);

        assert!(formatted.starts_with("error: Failed to get package details: Package \"red-led\" not found"));
        assert!(formatted.contains("\n\nhelp: "));
        assert!(!formatted.contains("caused by"));
    }

    #[test]
    fn test_source_chain_is_listed() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = TsciError::io("Failed to read tsci.toml".to_string(), io);

        let formatted = ErrorFormatter::with_colors(ColorSupport::disabled()).format_error(&err);

        assert!(formatted.starts_with("error: IO error: Failed to read tsci.toml"));
        assert!(formatted.ends_with("caused by: denied"));
    }
}
