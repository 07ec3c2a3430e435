//! Word validity gate.
//!
//! Only words in the bootstrap word list (a JSON array of strings) are looked
//! up upstream; anything else is answered as "not found" without network
//! access. Membership is exact: no case folding or trimming.

use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

use crate::core::KamoesError;
use crate::core::file_error::{FileOperation, FileResultExt};

/// Set of words eligible for upstream lookup.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    /// Load the word list at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::VocabularyError`] if the file is missing,
    /// unreadable, or not a JSON array of strings.
    pub fn load(path: &Path) -> Result<Self> {
        let vocabulary_error = |reason: String| KamoesError::VocabularyError {
            path: path.display().to_string(),
            reason,
        };

        let content = std::fs::read(path)
            .with_file_context(FileOperation::Read, path, "loading word list", "vocabulary::load")
            .map_err(|e| vocabulary_error(e.user_message()))?;
        let words: Vec<String> =
            serde_json::from_slice(&content).map_err(|e| vocabulary_error(e.to_string()))?;

        debug!("Loaded {} word(s) from {}", words.len(), path.display());
        Ok(Self::from_words(words))
    }

    /// Build a vocabulary from an in-memory list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `word` may be looked up upstream.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
