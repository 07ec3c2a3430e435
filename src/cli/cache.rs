//! Inspect the artifact cache.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::cache::CacheStore;
use crate::config::Config;

/// `kamoes cache`
#[derive(Args)]
pub struct CacheCommand {
    #[command(subcommand)]
    command: Option<CacheSubcommands>,
}

#[derive(Subcommand)]
enum CacheSubcommands {
    /// Show the artifact directory and artifact count (default)
    Info,

    /// List cached words, sorted
    List,
}

impl CacheCommand {
    pub async fn execute(self, config: Config) -> Result<()> {
        let store = CacheStore::open(config.dictionary_dir()?).await?;

        match self.command {
            Some(CacheSubcommands::Info) | None => {
                println!("{}", "Cache".bold());
                println!("  Directory: {}", store.dir().display());
                println!("  Artifacts: {}", store.len());
            }
            Some(CacheSubcommands::List) => {
                for word in store.words() {
                    println!("{word}");
                }
            }
        }
        Ok(())
    }
}
