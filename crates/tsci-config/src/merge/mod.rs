//! Configuration layering, file discovery, and environment overrides

use std::collections::HashMap;
use std::time::Duration;
use camino::Utf8PathBuf;
use tracing::debug;
use tsci_core::error::TsciError;
use tsci_registry::ClientConfig;
use crate::toml::{validate_config, validate_positive, validate_registry_url, TsciToml};
use crate::ConfigResult;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "tsci.toml";

/// Prefix of recognized environment variables
pub const ENV_PREFIX: &str = "TSCI_";

/// Locates and loads configuration files
pub struct ConfigLoader {
    /// Directory the project search starts from
    cwd: Utf8PathBuf,
    /// Global config file, if a home directory is known
    global_config_path: Option<Utf8PathBuf>,
}

/// Configuration layering and merging
pub struct ConfigLayering;

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project tsci.toml file
    Project(Utf8PathBuf),
    /// Environment variable
    Environment(String),
    /// CLI flag
    CommandLine,
}

/// Fully resolved settings, ready to build a registry client
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub registry_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    pub user_agent: String,
    /// Layers that contributed, lowest priority first
    pub sources: Vec<ConfigSource>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        let defaults = ClientConfig::default();
        Self {
            registry_url: defaults.base_url,
            timeout: defaults.timeout,
            cache_ttl: defaults.cache_ttl,
            user_agent: defaults.user_agent,
            sources: Vec::new(),
        }
    }
}

impl ResolvedConfig {
    /// Registry client settings
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.registry_url.clone(),
            timeout: self.timeout,
            cache_ttl: self.cache_ttl,
            user_agent: self.user_agent.clone(),
        }
    }
}

impl ConfigLoader {
    /// Create a loader rooted at `cwd`, with the global config under `~/.tsci`
    pub fn new(cwd: Utf8PathBuf) -> Self {
        let global_config_path = dirs::home_dir()
            .and_then(|home| Utf8PathBuf::try_from(home).ok())
            .map(|home| home.join(".tsci").join("config.toml"));

        Self { cwd, global_config_path }
    }

    /// Use another global config file, or none
    pub fn with_global_config_path(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.global_config_path = path;
        self
    }

    /// Find tsci.toml in `cwd` or the nearest ancestor
    pub fn find_project_config(&self) -> Option<Utf8PathBuf> {
        self.cwd
            .ancestors()
            .map(|dir| dir.join(PROJECT_CONFIG_FILE))
            .find(|candidate| candidate.is_file())
    }

    /// Load the nearest project configuration, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(TsciToml, ConfigSource)>> {
        let Some(path) = self.find_project_config() else {
            debug!("No {} found from {}", PROJECT_CONFIG_FILE, self.cwd);
            return Ok(None);
        };

        let config = crate::toml::load_from_file(&path).await?;
        debug!("Loaded project config from {}", path);
        Ok(Some((config, ConfigSource::Project(path))))
    }

    /// Load the global configuration, if present
    pub async fn load_global_config(&self) -> ConfigResult<Option<(TsciToml, ConfigSource)>> {
        let Some(path) = &self.global_config_path else {
            return Ok(None);
        };
        if !path.is_file() {
            return Ok(None);
        }

        let config = crate::toml::load_from_file(path).await?;
        debug!("Loaded global config from {}", path);
        Ok(Some((config, ConfigSource::Global(path.clone()))))
    }
}

impl ConfigLayering {
    /// Load every layer and resolve the final settings
    pub async fn resolve(
        loader: &ConfigLoader,
        cli_overrides: &HashMap<String, String>,
    ) -> ConfigResult<ResolvedConfig> {
        let global = loader.load_global_config().await?;
        let project = loader.load_project_config().await?;
        let env_overrides = Self::collect_env_overrides();

        Self::merge_configs(global, project, &env_overrides, cli_overrides)
    }

    /// Merge layers in priority order: defaults, global, project, environment, CLI
    pub fn merge_configs(
        global_config: Option<(TsciToml, ConfigSource)>,
        project_config: Option<(TsciToml, ConfigSource)>,
        env_overrides: &HashMap<String, String>,
        cli_overrides: &HashMap<String, String>,
    ) -> ConfigResult<ResolvedConfig> {
        let mut merged = TsciToml::default();
        let mut sources = Vec::new();

        for (layer, source) in [global_config, project_config].into_iter().flatten() {
            merged = merged.overlay(layer);
            sources.push(source);
        }

        Self::apply_env_overrides(&mut merged, env_overrides, &mut sources)?;

        // CLI flag overrides (highest priority)
        if Self::apply_cli_overrides(&mut merged, cli_overrides)? {
            sources.push(ConfigSource::CommandLine);
        }

        validate_config(&merged)?;

        let defaults = ResolvedConfig::default();
        let resolved = ResolvedConfig {
            registry_url: merged.registry.url.unwrap_or(defaults.registry_url),
            timeout: merged
                .registry
                .timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            cache_ttl: merged
                .cache
                .ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            user_agent: merged.registry.user_agent.unwrap_or(defaults.user_agent),
            sources,
        };
        debug!("Resolved configuration: {:?}", resolved);

        Ok(resolved)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(
        config: &mut TsciToml,
        overrides: &HashMap<String, String>,
        sources: &mut Vec<ConfigSource>,
    ) -> ConfigResult<()> {
        let mut keys: Vec<&String> = overrides.keys().collect();
        keys.sort();

        for key in keys {
            let value = overrides[key].trim();
            let applied = match key.as_str() {
                "TSCI_REGISTRY_URL" => {
                    validate_registry_url(key, value)?;
                    config.registry.url = Some(value.to_string());
                    true
                }
                "TSCI_TIMEOUT_MS" => {
                    config.registry.timeout_ms = Some(parse_positive(key, value)?);
                    true
                }
                "TSCI_CACHE_TTL_SECS" => {
                    config.cache.ttl_secs = Some(parse_positive(key, value)?);
                    true
                }
                "TSCI_USER_AGENT" => {
                    config.registry.user_agent = Some(value.to_string());
                    true
                }
                _ => {
                    // Unknown environment variable, ignore
                    false
                }
            };
            if applied {
                sources.push(ConfigSource::Environment(key.clone()));
            }
        }

        Ok(())
    }

    /// Apply CLI flag overrides, returning whether any applied
    fn apply_cli_overrides(config: &mut TsciToml, overrides: &HashMap<String, String>) -> ConfigResult<bool> {
        let mut applied = false;

        for (key, value) in overrides {
            match key.as_str() {
                "registry-url" => {
                    validate_registry_url("--registry-url", value)?;
                    config.registry.url = Some(value.clone());
                }
                "timeout-ms" => {
                    config.registry.timeout_ms = Some(parse_positive("--timeout-ms", value)?);
                }
                "cache-ttl-secs" => {
                    config.cache.ttl_secs = Some(parse_positive("--cache-ttl-secs", value)?);
                }
                "user-agent" => {
                    config.registry.user_agent = Some(value.clone());
                }
                _ => {
                    // Unknown CLI override, ignore
                    continue;
                }
            }
            applied = true;
        }

        Ok(applied)
    }

    /// Collect `TSCI_*` environment variables
    pub fn collect_env_overrides() -> HashMap<String, String> {
        Self::collect_env_overrides_from(std::env::vars())
    }

    /// Keep only `TSCI_*` entries of `vars`
    pub fn collect_env_overrides_from<I>(vars: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        vars.into_iter()
            .filter(|(key, _)| key.starts_with(ENV_PREFIX))
            .collect()
    }
}

fn parse_positive(field: &str, value: &str) -> ConfigResult<u64> {
    let parsed = value.trim().parse::<u64>().map_err(|e| TsciError::ConfigValidation {
        field: field.to_string(),
        reason: format!("'{}' is not a whole number: {}", value, e),
    })?;
    validate_positive(field, parsed)?;
    Ok(parsed)
}
