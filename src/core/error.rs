//! Error handling for Kamoes
//!
//! Two layers, as in the rest of the crate:
//! - [`KamoesError`] - typed failures of the lookup pipeline
//! - [`ErrorContext`] - a wrapper adding a suggestion and details for CLI display
//!
//! "No result" outcomes (unknown word, entry page without headings) are not
//! errors: the lookup service returns `Ok(None)` for them. Irregular page
//! structure never raises either; the extractor degrades to `None` fields.
//!
//! # Examples
//!
//! ```rust,no_run
//! use kamoes::core::{KamoesError, user_friendly_error};
//!
//! let error = KamoesError::UpstreamError {
//!     word: "rumah".to_string(),
//!     reason: "HTTP 429 Too Many Requests".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Failures surfaced by the lookup pipeline.
///
/// Transport and filesystem failures propagate to the caller; the HTTP layer
/// maps every one of them to a generic 500 response.
#[derive(Error, Debug, Clone)]
pub enum KamoesError {
    /// The entry page could not be retrieved.
    ///
    /// Covers non-success status codes (including upstream throttling) and
    /// transport failures. Never retried internally.
    #[error("Upstream request for '{word}' failed: {reason}")]
    UpstreamError {
        /// Word whose entry page was requested
        word: String,
        /// Status line or transport error
        reason: String,
    },

    /// An artifact could not be persisted.
    ///
    /// The lookup service logs this and still returns the resolved definitions.
    #[error("Failed to write cache artifact for '{word}' at {path}: {reason}")]
    CacheWriteError {
        /// Word being cached
        word: String,
        /// Artifact path
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// A cached artifact exists but could not be read or decoded.
    #[error("Failed to read cache artifact for '{word}': {reason}")]
    CacheReadError {
        /// Cached word
        word: String,
        /// Underlying failure
        reason: String,
    },

    /// The bootstrap word list could not be loaded.
    #[error("Failed to load word list from {path}: {reason}")]
    VocabularyError {
        /// Path of the word list
        path: String,
        /// Underlying failure
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper with user-facing details and a suggestion.
///
/// ```rust,no_run
/// use kamoes::core::{KamoesError, ErrorContext};
///
/// let context = ErrorContext::new(KamoesError::ConfigError {
///     message: "port must be non-zero".to_string(),
/// })
/// .with_suggestion("Set 'port' in kamoes.toml or KAMOES_PORT");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: KamoesError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: KamoesError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] for CLI display.
///
/// Recognizes [`KamoesError`] and a few [`std::io::Error`] kinds; anything else
/// is reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(kamoes_error) = error.downcast_ref::<KamoesError>() {
        return create_error_context(kamoes_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(KamoesError::Other {
                    message: io_error.to_string(),
                })
                .with_suggestion("Check ownership and permissions of the data directory")
                .with_details("Kamoes needs read and write access to its artifact directory");
            }
            std::io::ErrorKind::AddrInUse => {
                return ErrorContext::new(KamoesError::Other {
                    message: io_error.to_string(),
                })
                .with_suggestion("Pick another port with --port or KAMOES_PORT");
            }
            _ => {}
        }
    }

    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(KamoesError::Other {
        message,
    })
}

fn create_error_context(error: KamoesError) -> ErrorContext {
    match &error {
        KamoesError::UpstreamError {
            reason, ..
        } => {
            let throttled = reason.contains("429");
            ErrorContext::new(error.clone())
                .with_suggestion(if throttled {
                    "The dictionary site is throttling requests. Wait a moment and retry"
                } else {
                    "Check your network connection and the configured upstream_url"
                })
                .with_details("Entry pages are fetched once per word and cached afterwards")
        }

        KamoesError::VocabularyError {
            path, ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Provide a JSON array of words at {path} or point data_dir at a directory containing words.json"
            ))
            .with_details("Only words from the bootstrap list are looked up upstream"),

        KamoesError::CacheWriteError {
            path, ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!("Check that {path} is writable and the disk is not full"))
            .with_details("The definitions were still returned; only the cached copy is missing"),

        KamoesError::CacheReadError {
            word, ..
        } => ErrorContext::new(error.clone())
            .with_suggestion(format!(
                "Delete the artifact for '{word}' from the dictionary directory to force a re-fetch"
            ))
            .with_details("Artifacts are plain JSON files written once per word"),

        KamoesError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check kamoes.toml and the KAMOES_* environment variables"),

        _ => ErrorContext::new(error),
    }
}
