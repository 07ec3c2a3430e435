//! Configuration management for Kamoes
//!
//! Settings come from, in increasing precedence:
//!
//! 1. Built-in defaults
//! 2. A TOML file: `--config PATH`, else `KAMOES_CONFIG`, else `./kamoes.toml` when present
//! 3. Environment overrides: `KAMOES_DATA_DIR`, `KAMOES_PORT`, `KAMOES_UPSTREAM_URL`
//!
//! ```toml
//! port = 8000
//! data_dir = "/var/lib/kamoes"
//! upstream_url = "https://kbbi.kemdikbud.go.id"
//! request_timeout_secs = 30
//! max_redirect_depth = 5
//! rate_limit_max = 5
//! rate_limit_window_ms = 1000
//! single_flight = true
//! ```
//!
//! The data directory holds the bootstrap word list (`words.json`) and the
//! artifact directory (`dictionary/`).

mod parser;

pub use parser::parse_config;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::constants::{
    CONFIG_FILE, DEFAULT_MAX_REDIRECT_DEPTH, DEFAULT_PORT, DEFAULT_RATE_LIMIT_MAX,
    DEFAULT_RATE_LIMIT_WINDOW, DEFAULT_REQUEST_TIMEOUT, DEFAULT_UPSTREAM_URL, DICTIONARY_DIR,
    WORD_LIST_FILE,
};
use crate::core::KamoesError;

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_upstream_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

const fn default_max_redirect_depth() -> usize {
    DEFAULT_MAX_REDIRECT_DEPTH
}

const fn default_rate_limit_max() -> u32 {
    DEFAULT_RATE_LIMIT_MAX
}

const fn default_rate_limit_window_ms() -> u64 {
    DEFAULT_RATE_LIMIT_WINDOW.as_millis() as u64
}

const fn default_single_flight() -> bool {
    true
}

/// Runtime configuration of the lookup service and server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// HTTP port of `kamoes serve`.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding `words.json` and `dictionary/`.
    ///
    /// `None` means `~/.kamoes`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Base URL of the upstream dictionary site.
    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    /// Timeout of one upstream request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum cross-reference chain followed for one word.
    #[serde(default = "default_max_redirect_depth")]
    pub max_redirect_depth: usize,

    /// Requests admitted per rate limit window.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max: u32,

    /// Rate limit window length, in milliseconds.
    #[serde(default = "default_rate_limit_window_ms")]
    pub rate_limit_window_ms: u64,

    /// Share one resolver run between concurrent misses of the same word.
    #[serde(default = "default_single_flight")]
    pub single_flight: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: default_port(),
            data_dir: None,
            upstream_url: default_upstream_url(),
            request_timeout_secs: default_request_timeout_secs(),
            max_redirect_depth: default_max_redirect_depth(),
            rate_limit_max: default_rate_limit_max(),
            rate_limit_window_ms: default_rate_limit_window_ms(),
            single_flight: default_single_flight(),
        }
    }
}

impl Config {
    /// Load configuration from the first config file found, then apply
    /// environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file is missing, a file fails
    /// to parse, or the resulting values are invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => std::env::var("KAMOES_CONFIG").ok().map(PathBuf::from).or_else(|| {
                let local = PathBuf::from(CONFIG_FILE);
                local.exists().then_some(local)
            }),
        };

        let mut config = match path {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                parse_config::<Self>(&path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `KAMOES_*` overrides using the given variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `KAMOES_PORT` is not a port number.
    pub fn apply_overrides<F>(&mut self, var: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = var("KAMOES_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(port) = var("KAMOES_PORT") {
            self.port = port.parse().map_err(|_| KamoesError::ConfigError {
                message: format!("KAMOES_PORT must be a port number, got '{port}'"),
            })?;
        }
        if let Some(url) = var("KAMOES_UPSTREAM_URL") {
            self.upstream_url = url;
        }
        Ok(())
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::ConfigError`] for an unparsable upstream URL, a
    /// zero rate limit, or a zero window.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.upstream_url).map_err(|e| KamoesError::ConfigError {
            message: format!("upstream_url '{}' is not a valid URL: {e}", self.upstream_url),
        })?;
        if self.rate_limit_max == 0 || self.rate_limit_window_ms == 0 {
            return Err(KamoesError::ConfigError {
                message: "rate_limit_max and rate_limit_window_ms must be greater than zero"
                    .to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Resolved data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no data dir is configured and the home directory
    /// cannot be determined.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let home = dirs::home_dir().context("Unable to determine home directory")?;
        Ok(home.join(".kamoes"))
    }

    /// Directory of per-word JSON artifacts.
    pub fn dictionary_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(DICTIONARY_DIR))
    }

    /// Path of the bootstrap word list.
    pub fn word_list_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(WORD_LIST_FILE))
    }

    /// Upstream request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Rate limit window.
    #[must_use]
    pub const fn rate_limit_window(&self) -> Duration {
        Duration::from_millis(self.rate_limit_window_ms)
    }
}
