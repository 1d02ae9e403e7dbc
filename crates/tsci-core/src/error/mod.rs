//! Error types and result aliases for tsci operations.
//!
//! Provides a unified error type covering every failure the registry access
//! layer can surface, with actionable error messages.

use thiserror::Error;

/// Unified error type for all tsci operations
#[derive(Error, Debug)]
pub enum TsciError {
    // Config errors
    #[error("Failed to parse tsci.toml: {message}")]
    TomlParse { message: String },

    #[error("Configuration field '{field}' is invalid: {reason}")]
    ConfigValidation { field: String, reason: String },

    // Transport errors
    #[error("Network error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Request to {url} timed out after {timeout_ms}ms")]
    Timeout { url: String, timeout_ms: u64 },

    // Registry errors
    #[error("{message}")]
    Upstream { message: String, status: Option<u16> },

    #[error("Package \"{name}\" not found")]
    PackageNotFound { name: String },

    #[error("No index file found in package \"{package}\"")]
    EntryFileNotFound { package: String },

    #[error("No code found in package \"{package}\"")]
    EmptyResult { package: String },

    /// A failure wrapped with the public operation it belongs to
    #[error("Failed to {operation}: {source}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<TsciError>,
    },

    // IO errors
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for tsci operations
pub type TsciResult<T> = Result<T, TsciError>;

impl TsciError {
    /// Create a transport error from any error type
    pub fn transport<E>(message: String, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            message,
            source: Some(Box::new(source)),
        }
    }

    /// Create an upstream error, falling back to generic text when the
    /// registry did not say what went wrong
    pub fn upstream(context: &str, registry_message: Option<&str>, status: Option<u16>) -> Self {
        let detail = registry_message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or("Unknown error");
        Self::Upstream {
            message: format!("{}: {}", context, detail),
            status,
        }
    }

    /// Create an IO error from std::io::Error
    pub fn io(message: String, source: std::io::Error) -> Self {
        Self::Io { message, source }
    }

    /// Wrap this error with the name of the public operation that failed.
    ///
    /// Already-wrapped errors are returned unchanged so nested operations
    /// never produce "Failed to x: Failed to y" chains.
    pub fn in_operation(self, operation: &'static str) -> Self {
        match self {
            wrapped @ TsciError::Operation { .. } => wrapped,
            other => TsciError::Operation {
                operation,
                source: Box::new(other),
            },
        }
    }

    /// The innermost error, looking through operation wrappers
    pub fn root_cause(&self) -> &TsciError {
        match self {
            TsciError::Operation { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Check whether the failure means "nothing matched" rather than "something broke"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_cause(),
            TsciError::PackageNotFound { .. } | TsciError::EntryFileNotFound { .. }
        )
    }

    /// Check if this error came from the network rather than the registry's answer
    pub fn is_transport(&self) -> bool {
        matches!(
            self.root_cause(),
            TsciError::Transport { .. } | TsciError::Timeout { .. }
        )
    }

    /// Get a user-friendly suggestion for fixing this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.root_cause() {
            TsciError::PackageNotFound { .. } => {
                Some("Use the fully qualified \"owner/name\" form or search the registry first")
            },
            TsciError::EntryFileNotFound { .. } => {
                Some("The package has no index.tsx, index.ts, src/index.tsx or src/index.ts")
            },
            TsciError::Transport { .. } => Some("Check your internet connection and try again"),
            TsciError::Timeout { .. } => {
                Some("The registry is slow to respond; raise --timeout-ms or try again later")
            },
            TsciError::ConfigValidation { .. } | TsciError::TomlParse { .. } => {
                Some("Fix tsci.toml or the TSCI_* environment variables")
            },
            _ => None,
        }
    }
}
