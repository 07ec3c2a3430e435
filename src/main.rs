//! Kamoes CLI entry point
//!
//! Parses arguments, installs logging, runs the selected command and renders
//! failures with [`user_friendly_error`].
//!
//! - `serve` - run the HTTP API
//! - `lookup` - look up one word
//! - `cache` - inspect cached artifacts
//! - `config` - print the effective configuration

use anyhow::Result;
use clap::Parser;
use kamoes::cli;
use kamoes::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli.init_logging();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
