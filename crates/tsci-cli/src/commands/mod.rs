//! Command implementations and dispatch logic.
//!
//! Each command is an async function that takes a CommandContext.

use camino::Utf8PathBuf;
use std::collections::HashMap;
use tracing::{debug, info};
use tsci_config::{ConfigLayering, ConfigLoader};
use tsci_core::error::{TsciError, TsciResult};
use tsci_registry::RegistryClient;

pub mod analyze;
pub mod batch;
pub mod code;
pub mod details;
pub mod search;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub client: RegistryClient,
    /// Print results as JSON instead of text
    pub json: bool,
}

impl CommandContext {
    /// Resolve configuration from the working directory and build the client
    pub async fn new(cli_overrides: &HashMap<String, String>, json: bool) -> TsciResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| TsciError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::try_from(cwd).map_err(|e| TsciError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory is not valid UTF-8: {}", e),
        })?;

        let loader = ConfigLoader::new(cwd.clone());
        let config = ConfigLayering::resolve(&loader, cli_overrides).await?;
        let client = RegistryClient::with_config(config.client_config())?;
        debug!("Using registry {}", client.base_url());

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
            client,
            json,
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> TsciResult<()> {
    debug!("Working directory: {}", ctx.cwd);

    match command {
        Commands::Search { query, limit, category } => {
            info!("Searching: {} (limit: {:?}, category: {:?})", query, limit, category);
            search::execute(query, limit, category, ctx).await
        }
        Commands::Details { package } => {
            info!("Fetching details: {}", package);
            details::execute(package, ctx).await
        }
        Commands::Code { package, version } => {
            info!("Fetching code: {} (version: {:?})", package, version);
            code::execute(package, version, ctx).await
        }
        Commands::Analyze { package } => {
            info!("Analyzing: {}", package);
            analyze::execute(package, ctx).await
        }
        Commands::Batch => {
            info!("Entering batch mode");
            batch::execute(ctx).await
        }
        Commands::Version => show_version(&ctx.output, ctx.json),
    }
}

/// Run a command that needs neither configuration nor a registry client.
///
/// Returns `None` when `command` needs the full context.
pub fn run_standalone(command: &Commands, output: &OutputHandler, json: bool) -> Option<TsciResult<()>> {
    match command {
        Commands::Version => Some(show_version(output, json)),
        _ => None,
    }
}

fn show_version(output: &OutputHandler, json: bool) -> TsciResult<()> {
    info!("Showing version information");
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    if json {
        return output.json(&serde_json::json!({
            "version": version,
            "built": build_date,
            "target": target,
            "rustc": env!("RUSTC_VERSION"),
        }));
    }

    output.data(&format!("tsci v{}", version));
    output.info(&format!("Built: {}", build_date));
    output.info(&format!("Target: {}", target));
    output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}
