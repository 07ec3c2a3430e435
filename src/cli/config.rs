//! Print the effective configuration.

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;

/// `kamoes config`
#[derive(Args)]
pub struct ConfigCommand {
    /// Print only the resolved data directory
    #[arg(long)]
    data_dir: bool,
}

impl ConfigCommand {
    pub fn execute(self, config: &Config) -> Result<()> {
        if self.data_dir {
            println!("{}", config.data_dir()?.display());
            return Ok(());
        }

        let rendered = toml::to_string_pretty(config).context("Failed to render config")?;
        print!("{rendered}");
        Ok(())
    }
}
