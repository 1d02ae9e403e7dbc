//! Configuration for the tscircuit registry client
//!
//! This crate parses tsci.toml files and layers them with environment
//! variables and command-line overrides into one resolved configuration.

pub mod toml;
pub mod merge;

// Re-export main types
pub use toml::{TsciToml, RegistrySection, CacheSection};
pub use merge::{ConfigLoader, ConfigLayering, ConfigSource, ResolvedConfig};

use tsci_core::error::TsciError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, TsciError>;
