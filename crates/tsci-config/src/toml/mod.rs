//! tsci.toml configuration parsing and serialization

use serde::{Deserialize, Serialize};
use tsci_core::error::TsciError;
use url::Url;
use crate::ConfigResult;

/// Complete tsci.toml configuration. Every field is optional so a file may
/// override any subset of the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TsciToml {
    /// Registry connection settings
    #[serde(default)]
    pub registry: RegistrySection,

    /// Response cache settings
    #[serde(default)]
    pub cache: CacheSection,
}

/// `[registry]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct RegistrySection {
    /// Registry base URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Per-request timeout in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// User agent sent with every request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// `[cache]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CacheSection {
    /// Lifetime of cached responses in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ttl_secs: Option<u64>,
}

impl TsciToml {
    /// Overlay `other` on top of `self`; fields set in `other` win
    pub fn overlay(mut self, other: TsciToml) -> Self {
        if other.registry.url.is_some() {
            self.registry.url = other.registry.url;
        }
        if other.registry.timeout_ms.is_some() {
            self.registry.timeout_ms = other.registry.timeout_ms;
        }
        if other.registry.user_agent.is_some() {
            self.registry.user_agent = other.registry.user_agent;
        }
        if other.cache.ttl_secs.is_some() {
            self.cache.ttl_secs = other.cache.ttl_secs;
        }
        self
    }
}

/// Parse TOML string to TsciToml configuration
pub fn parse_tsci_toml(content: &str) -> ConfigResult<TsciToml> {
    let config: TsciToml = toml::from_str(content).map_err(|e| TsciError::TomlParse {
        message: e.to_string(),
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Serialize TsciToml to TOML string
pub fn serialize_tsci_toml(config: &TsciToml) -> ConfigResult<String> {
    toml::to_string_pretty(config).map_err(|e| TsciError::TomlParse {
        message: format!("serialization failed: {}", e),
    })
}

/// Validate the fields a file sets
pub fn validate_config(config: &TsciToml) -> ConfigResult<()> {
    if let Some(url) = &config.registry.url {
        validate_registry_url("registry.url", url)?;
    }
    if let Some(timeout_ms) = config.registry.timeout_ms {
        validate_positive("registry.timeout-ms", timeout_ms)?;
    }
    if let Some(user_agent) = &config.registry.user_agent {
        if user_agent.trim().is_empty() {
            return Err(TsciError::ConfigValidation {
                field: "registry.user-agent".to_string(),
                reason: "user agent must not be empty".to_string(),
            });
        }
    }
    if let Some(ttl_secs) = config.cache.ttl_secs {
        validate_positive("cache.ttl-secs", ttl_secs)?;
    }

    Ok(())
}

/// Load and parse tsci.toml from file path
pub async fn load_from_file(path: &camino::Utf8Path) -> ConfigResult<TsciToml> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| TsciError::io(format!("Failed to read {}", path), e))?;

    parse_tsci_toml(&content).map_err(|e| match e {
        TsciError::TomlParse { message } => TsciError::TomlParse {
            message: format!("in file {}: {}", path, message),
        },
        TsciError::ConfigValidation { field, reason } => TsciError::ConfigValidation {
            field,
            reason: format!("{} (in file {})", reason, path),
        },
        other => other,
    })
}

/// Registry URLs must parse and use http or https
pub(crate) fn validate_registry_url(field: &str, value: &str) -> ConfigResult<()> {
    let url = Url::parse(value).map_err(|e| TsciError::ConfigValidation {
        field: field.to_string(),
        reason: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(TsciError::ConfigValidation {
            field: field.to_string(),
            reason: format!("unsupported scheme '{}', expected http or https", scheme),
        }),
    }
}

pub(crate) fn validate_positive(field: &str, value: u64) -> ConfigResult<()> {
    if value == 0 {
        return Err(TsciError::ConfigValidation {
            field: field.to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
