//! # tsci-cli
//!
//! Command-line access to the tscircuit component registry.
//!
//! This is the entry point for the `tsci` tool. It parses arguments, sets up
//! logging and panic reporting, and dispatches to the command handlers.

use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tsci_core::error::{TsciError, TsciResult};
use tsci_core::types::ComponentCategory;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;
use output::OutputHandler;

/// Search, inspect and analyze tscircuit registry packages
#[derive(Parser)]
#[command(name = "tsci", version, about = "tscircuit registry client")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Registry base URL
    #[arg(long, global = true, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Per-request timeout in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Lifetime of cached responses in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub cache_ttl_secs: Option<u64>,
}

impl Cli {
    /// Flags that override configuration files and environment
    pub fn config_overrides(&self) -> HashMap<String, String> {
        let mut overrides = HashMap::new();
        if let Some(url) = &self.registry_url {
            overrides.insert("registry-url".to_string(), url.clone());
        }
        if let Some(timeout_ms) = self.timeout_ms {
            overrides.insert("timeout-ms".to_string(), timeout_ms.to_string());
        }
        if let Some(ttl) = self.cache_ttl_secs {
            overrides.insert("cache-ttl-secs".to_string(), ttl.to_string());
        }
        overrides
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search the registry
    Search {
        query: String,
        /// Maximum number of results (0 for all)
        #[arg(short, long)]
        limit: Option<usize>,
        /// Only keep packages mentioning this category
        #[arg(short, long)]
        category: Option<ComponentCategory>,
    },
    /// Show package details
    Details {
        package: String,
    },
    /// Print the source of a package's entry file
    Code {
        package: String,
        /// Requested release (the latest release is always served)
        #[arg(long)]
        version: Option<String>,
    },
    /// Classify a package and estimate its electrical specs
    Analyze {
        package: String,
    },
    /// Answer JSON requests read line by line from stdin
    Batch,
    /// Show version information
    Version,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose);
    setup_panic_handler();

    info!("Starting tsci v{}", env!("CARGO_PKG_VERSION"));

    match run_cli(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", ErrorFormatter::new().format_error(&err));
            ExitCode::FAILURE
        }
    }
}

fn run_cli(cli: Cli) -> TsciResult<()> {
    if let Some(result) = commands::run_standalone(&cli.command, &OutputHandler::new(), cli.json) {
        return result;
    }

    // Create Tokio runtime for async operations
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| TsciError::io("Failed to create async runtime".to_string(), e))?;

    rt.block_on(async {
        let ctx = CommandContext::new(&cli.config_overrides(), cli.json).await?;
        commands::dispatch_command(cli.command, &ctx).await
    })
}

/// Logs go to stderr so stdout carries only results
fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "tsci={level},tsci_registry={level},tsci_config={level}",
            level = level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|panic_info| {
        error!("tsci encountered an unexpected error: {}", panic_info);
        eprintln!("tsci crashed! This is a bug.");
        eprintln!("Please report this at: https://github.com/tscircuit/tsci-registry/issues");
        eprintln!("Error: {}", panic_info);
    }));
}
