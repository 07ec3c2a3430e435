//! Artifact cache: one pretty-printed JSON file per resolved word.
//!
//! The store keeps an in-memory index from word to artifact path, built at
//! startup by scanning the artifact directory:
//!
//! ```text
//! ~/.kamoes/dictionary/
//! ├── rumah.json
//! ├── zaman.json
//! └── rumah_makan.json     # "rumah makan"
//! ```
//!
//! Words are keyed by [`CacheStore::canonical_key`] (lowercased, `_` read as
//! a space), and file names are the key with spaces written as `_`, so the
//! index built by the scan and the index updated by `put` agree. Artifacts are immutable: [`CacheStore::put`]
//! never replaces an existing file, so a word with an artifact is never
//! re-fetched or rewritten.
//!
//! Writes go through a temporary file and a rename, so concurrent readers
//! see either a complete artifact or none.

use anyhow::{Context, Result};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::core::KamoesError;
use crate::core::file_error::{FileOperation, FileResultExt};
use crate::models::Definition;
use crate::utils::fs::{atomic_write_new, ensure_dir};

/// Word-keyed store of resolved definitions.
///
/// Cloning is cheap; clones share the index.
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
    index: Arc<DashMap<String, PathBuf>>,
}

impl CacheStore {
    /// Open the artifact directory, creating it if missing, and index every
    /// `*.json` file in it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or listed.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        ensure_dir(&dir)?;

        let index = DashMap::new();
        let mut entries = tokio::fs::read_dir(&dir).await.with_file_context(
            FileOperation::ReadDir,
            &dir,
            "indexing cached artifacts",
            "cache::open",
        )?;

        while let Some(entry) = entries.next_entry().await.with_file_context(
            FileOperation::ReadDir,
            &dir,
            "indexing cached artifacts",
            "cache::open",
        )? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                index.insert(Self::canonical_key(stem), path);
            }
        }

        debug!("Indexed {} cached artifact(s) in {}", index.len(), dir.display());
        Ok(Self {
            dir,
            index: Arc::new(index),
        })
    }

    /// Index key for `word`: lowercased, `_` read as a space.
    pub fn canonical_key(word: &str) -> String {
        word.to_lowercase().replace('_', " ")
    }

    /// Artifact file name for `word`: the canonical key with spaces as `_`.
    pub fn artifact_file_name(word: &str) -> String {
        format!("{}.json", Self::canonical_key(word).replace(' ', "_"))
    }

    /// Artifact directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether `word` has an artifact.
    pub fn has(&self, word: &str) -> bool {
        self.index.contains_key(&Self::canonical_key(word))
    }

    /// Number of indexed artifacts.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no artifacts are indexed.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Indexed words, sorted.
    pub fn words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.index.iter().map(|e| e.key().clone()).collect();
        words.sort();
        words
    }

    /// Raw artifact bytes for `word`, or `None` when not cached.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::CacheReadError`] if the indexed file cannot be read.
    pub async fn get(&self, word: &str) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.index.get(&Self::canonical_key(word)).map(|p| p.value().clone())
        else {
            return Ok(None);
        };

        let bytes = tokio::fs::read(&path)
            .await
            .with_file_context(FileOperation::Read, &path, "reading cached artifact", "cache::get")
            .map_err(|e| KamoesError::CacheReadError {
                word: word.to_string(),
                reason: e.user_message(),
            })?;
        Ok(Some(bytes))
    }

    /// Decoded artifact for `word`, or `None` when not cached.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::CacheReadError`] if the file cannot be read or
    /// is not a JSON array of definitions.
    pub async fn get_definitions(&self, word: &str) -> Result<Option<Vec<Definition>>> {
        let Some(bytes) = self.get(word).await? else {
            return Ok(None);
        };
        let definitions = serde_json::from_slice(&bytes).map_err(|e| KamoesError::CacheReadError {
            word: word.to_string(),
            reason: format!("invalid artifact JSON: {e}"),
        })?;
        Ok(Some(definitions))
    }

    /// Persist `definitions` for `word` and index the artifact.
    ///
    /// Returns `Ok(false)` without writing when an artifact already exists.
    ///
    /// # Errors
    ///
    /// Returns [`KamoesError::CacheWriteError`] if encoding or writing fails.
    pub async fn put(&self, word: &str, definitions: &[Definition]) -> Result<bool> {
        let path = self.dir.join(Self::artifact_file_name(word));
        let write_error = |reason: String| KamoesError::CacheWriteError {
            word: word.to_string(),
            path: path.display().to_string(),
            reason,
        };

        let json = serde_json::to_vec_pretty(definitions).map_err(|e| write_error(e.to_string()))?;

        let target = path.clone();
        let written = tokio::task::spawn_blocking(move || atomic_write_new(&target, &json))
            .await
            .context("Artifact write task panicked")?
            .map_err(|e| write_error(format!("{e:#}")))?;

        if written {
            debug!("Cached '{word}' at {}", path.display());
        } else {
            debug!("Artifact for '{word}' already exists, leaving it untouched");
        }
        self.index.insert(Self::canonical_key(word), path);
        Ok(written)
    }
}
