//! Generic TOML parsing with file path context.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::file_error::{FileOperation, FileResultExt};

/// Parse a TOML configuration file into the specified type.
///
/// Read and parse failures both name the file in the error chain.
///
/// ```rust,no_run
/// use kamoes::config::{Config, parse_config};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let config: Config = parse_config(Path::new("kamoes.toml"))?;
/// println!("port {}", config.port);
/// # Ok(())
/// # }
/// ```
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path).with_file_context(
        FileOperation::Read,
        path,
        "reading config file",
        "config::parse_config",
    )?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
