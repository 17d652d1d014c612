//! Web service error catalog tool.
//!
//! Resolves and loads the error catalog the same way the service does and
//! simulates the error part of a response.
//!
//! # Usage
//!
//! ```bash
//! # Which catalog file would the service read?
//! websvc-errors --config-dir ./config path
//!
//! # List all codes
//! websvc-errors list --json
//!
//! # Render one error as a client would receive it
//! websvc-errors render 203 limit 1..100 --query "suppress_response_codes=true"
//! ```

// CLI tools are expected to print to stdout/stderr
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;
use websvc_errors::{
    Catalog, CatalogConfig, CatalogLoader, ErrorRegistry, ErrorResponse, PlaceholderPolicy,
    ProcessEnv, QueryParams,
};

use crate::config::CliConfig;

/// Inspect the error catalog and simulate error responses
#[derive(Parser, Debug)]
#[command(name = "websvc-errors")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base configuration directory (overrides config file and WEBSVC_BASE_CONFIG_DIR)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the catalog file that would be loaded
    Path,
    /// List catalog definitions
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Record one error and print the resulting response
    Render {
        /// Error code to record
        code: String,
        /// Positional message parameters ($1, $2, ...)
        params: Vec<String>,
        /// Request query string, e.g. "suppress_response_codes=true"
        #[arg(long, default_value = "")]
        query: String,
        /// Substitute placeholders even when lower indices are missing
        #[arg(long)]
        all_indices: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.config.as_deref()
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(dir) = cli.config_dir.clone() {
        config.base_config_dir = dir;
    }

    init_logging(&config.log_level, cli.verbose);

    let catalog_config = CatalogConfig::from_environment(&ProcessEnv, &config.base_config_dir);
    let loader = CatalogLoader::new(catalog_config);

    match cli.command {
        Commands::Path => {
            let path = loader.resolve_path()?;
            println!("{}", path.display());
        }
        Commands::List { json } => {
            let catalog = loader.load().context("failed to load error catalog")?;
            if json {
                print_json_catalog(&catalog)?;
            } else {
                print_catalog(&catalog);
            }
        }
        Commands::Render {
            code,
            params,
            query,
            all_indices,
        } => {
            let catalog = loader.load().context("failed to load error catalog")?;
            let policy = if all_indices {
                PlaceholderPolicy::AllIndices
            } else {
                PlaceholderPolicy::StopAtFirstGap
            };

            let response = render_response(Arc::new(catalog), policy, &code, &params, &query)?;
            print_response(&response)?;
        }
    }

    Ok(())
}

/// Simulate one request that records `code` and carries `query`.
fn render_response(
    catalog: Arc<Catalog>,
    policy: PlaceholderPolicy,
    code: &str,
    params: &[String],
    query: &str,
) -> Result<ErrorResponse> {
    let query = QueryParams::parse(query).context("invalid --query")?;
    let mut registry = ErrorRegistry::new(catalog).with_placeholder_policy(policy);
    registry.add_error(code, params);
    registry.check_suppress_response_codes(&query);
    Ok(ErrorResponse::from_owned_registry(registry))
}

fn init_logging(level: &str, verbose: u8) {
    let default = match verbose {
        0 => level,
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json_catalog(catalog: &Catalog) -> Result<()> {
    let definitions: Vec<_> = catalog.definitions().collect();
    println!("{}", serde_json::to_string_pretty(&definitions)?);
    Ok(())
}

fn print_catalog(catalog: &Catalog) {
    println!("  {} ({} codes)", "ERROR CATALOG".bold(), catalog.len());
    println!("{}", "-".repeat(80));
    for def in catalog.definitions() {
        let status = def.response_code.to_string();
        let status = if def.response_code >= 500 {
            status.red()
        } else {
            status.yellow()
        };
        println!("  {:<8} {}  {}", def.code.bold(), status, def.message);
    }
}

fn print_response(response: &ErrorResponse) -> Result<()> {
    let status = response.status_code();
    let line = format!("HTTP {status}");
    if status.is_success() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
    println!("{}", serde_json::to_string_pretty(response)?);
    Ok(())
}
