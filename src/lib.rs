//! Kamoes - caching lookup service for the KBBI dictionary
//!
//! Kamoes turns a word into structured dictionary definitions. Entry pages are
//! fetched from the upstream KBBI site, extracted into typed records,
//! non-standard spellings are followed to their standard forms, and the result
//! is persisted as one JSON artifact per word so each word is fetched at most
//! once.
//!
//! # Pipeline
//!
//! ```text
//! word ─▶ cache hit? ─▶ in vocabulary? ─▶ fetch ─▶ extract ─▶ resolve redirects ─▶ persist
//! ```
//!
//! # Core Modules
//!
//! - [`models`] - `Definition`, `Sense`, `ReferenceSense`, `Attribution`
//! - [`document`] - read-only document tree abstraction over parsed HTML
//! - [`extractor`] - entry page extraction into definitions and cross-references
//! - [`fetcher`] - upstream HTTP retrieval behind the `DocumentFetcher` seam
//! - [`resolver`] - cross-reference following with cycle and depth bounds
//! - [`cache`] - per-word JSON artifact store with an in-memory index
//! - [`vocabulary`] - bootstrap word list gating upstream lookups
//! - [`lookup`] - cache-first lookup with single-flight resolution
//!
//! # Surfaces
//!
//! - [`server`] - axum HTTP API (`GET /{word}`), rate limiting, timing header
//! - [`cli`] - `serve`, `lookup`, `cache` and `config` commands
//! - [`config`] - TOML file plus `KAMOES_*` environment overrides
//!
//! # Supporting Modules
//!
//! - [`core`] - error types and user-facing error rendering
//! - [`constants`] - upstream headers, defaults, file names
//! - [`utils`] - directory creation and atomic writes
//!
//! # Example
//!
//! ```rust,no_run
//! use kamoes::config::Config;
//! use kamoes::server::App;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let app = App::init(Config::load(None)?).await?;
//! if let Some(definitions) = app.lookup().lookup("rumah").await? {
//!     println!("{}", serde_json::to_string_pretty(&definitions)?);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod resolver;

pub mod document;
pub mod extractor;
pub mod fetcher;

pub mod lookup;
pub mod server;
pub mod vocabulary;

pub mod models;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
