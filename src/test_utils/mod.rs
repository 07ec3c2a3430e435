//! Test utilities for Kamoes
//!
//! - [`init_test_logging`] - one-time tracing setup that respects `RUST_LOG`
//! - [`StaticFetcher`] - in-memory [`DocumentFetcher`] that counts fetches
//! - [`fixtures`] - entry page HTML shaped like the upstream site
//!
//! # Example
//!
//! ```rust,no_run
//! use kamoes::test_utils::{StaticFetcher, fixtures};
//!
//! let fetcher = StaticFetcher::new().with_page("rumah", fixtures::RUMAH);
//! assert_eq!(fetcher.fetch_count("rumah"), 0);
//! ```

pub mod fixtures;

use anyhow::Result;
use dashmap::DashMap;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Once;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::core::KamoesError;
use crate::fetcher::DocumentFetcher;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging
/// stays off.
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// In-memory fetcher serving fixed pages.
///
/// Words without a page fail with an `UpstreamError` (`HTTP 404`), as do
/// words registered through [`StaticFetcher::with_failure`].
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    failures: HashMap<String, String>,
    delay: Option<Duration>,
    counts: DashMap<String, usize>,
}

impl StaticFetcher {
    /// Empty fetcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `word`.
    #[must_use]
    pub fn with_page(mut self, word: &str, html: &str) -> Self {
        self.pages.insert(word.to_string(), html.to_string());
        self
    }

    /// Fail every fetch of `word` with `reason`.
    #[must_use]
    pub fn with_failure(mut self, word: &str, reason: &str) -> Self {
        self.failures.insert(word.to_string(), reason.to_string());
        self
    }

    /// Sleep before answering, to widen race windows.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of fetches of `word` so far.
    pub fn fetch_count(&self, word: &str) -> usize {
        self.counts.get(word).map_or(0, |c| *c)
    }

    /// Number of fetches of any word so far.
    pub fn total_fetches(&self) -> usize {
        self.counts.iter().map(|c| *c.value()).sum()
    }

    async fn serve(&self, word: &str) -> Result<String> {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let upstream = |reason: &str| KamoesError::UpstreamError {
            word: word.to_string(),
            reason: reason.to_string(),
        };

        if let Some(reason) = self.failures.get(word) {
            return Err(upstream(reason).into());
        }
        self.pages.get(word).cloned().ok_or_else(|| upstream("HTTP 404 Not Found").into())
    }
}

impl DocumentFetcher for StaticFetcher {
    fn fetch<'a>(
        &'a self,
        word: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>> {
        Box::pin(self.serve(word))
    }
}
