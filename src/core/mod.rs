//! Core error types for Kamoes
//!
//! - [`KamoesError`] - enumerated failures of the lookup pipeline
//! - [`ErrorContext`] - user-facing wrapper with suggestions, used by the CLI
//! - [`user_friendly_error`] - convert any `anyhow::Error` for display
//! - [`file_error`] - file operation context for cache and word-list IO
//!
//! # Example
//!
//! ```rust,no_run
//! use kamoes::core::{KamoesError, user_friendly_error};
//! use anyhow::Result;
//!
//! fn fetch() -> Result<String> {
//!     Err(KamoesError::UpstreamError {
//!         word: "rumah".to_string(),
//!         reason: "HTTP 503 Service Unavailable".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = fetch() {
//!     user_friendly_error(e).display();
//! }
//! ```

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, KamoesError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
