//! Command-line interface for Kamoes.
//!
//! # Commands
//!
//! - `serve` - run the HTTP API
//! - `lookup` - look up one word and print it
//! - `cache` - inspect cached artifacts
//! - `config` - print the effective configuration
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - debug logging
//! - `--quiet` / `-q` - errors only
//! - `--config` / `-c` - config file path (otherwise `KAMOES_CONFIG`, then `./kamoes.toml`)
//!
//! Logs go to stderr so `lookup --format json` output can be piped.
//!
//! # Example
//!
//! ```bash
//! kamoes serve --port 8080
//! kamoes lookup rumah
//! kamoes lookup jaman --format json
//! kamoes cache list
//! ```

mod cache;
mod config;
mod lookup;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Main CLI structure for Kamoes.
#[derive(Parser)]
#[command(
    name = "kamoes",
    about = "Caching KBBI dictionary lookup service",
    version,
    long_about = None
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the config file.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(serve::ServeCommand),

    /// Look up a word and print its definitions.
    Lookup(lookup::LookupCommand),

    /// Inspect cached artifacts.
    Cache(cache::CacheCommand),

    /// Print the effective configuration.
    Config(config::ConfigCommand),
}

impl Cli {
    /// Log filter selected by `--verbose` / `--quiet`; `None` defers to
    /// `RUST_LOG`.
    #[must_use]
    pub fn log_filter(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Install the global tracing subscriber, writing to stderr.
    pub fn init_logging(&self) {
        let filter = match self.log_filter() {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Load configuration and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns configuration errors and any error of the command.
    pub async fn execute(self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;

        match self.command {
            Commands::Serve(cmd) => cmd.execute(config).await,
            Commands::Lookup(cmd) => cmd.execute(config).await,
            Commands::Cache(cmd) => cmd.execute(config).await,
            Commands::Config(cmd) => cmd.execute(&config),
        }
    }
}
