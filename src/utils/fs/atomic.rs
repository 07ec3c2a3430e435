//! Atomic file write operations using a temp-file-and-rename strategy.
//!
//! Readers never observe a partially written artifact: content goes to a
//! uniquely named temporary file in the target directory, is synced, and is
//! then renamed into place.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Atomically writes bytes to a file only if it does not exist yet.
///
/// Parent directories are created as needed. Returns `Ok(false)` without
/// touching the target when a file is already there, including one that
/// appeared while this write was in flight.
///
/// ```rust,no_run
/// use kamoes::utils::fs::atomic_write_new;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let written = atomic_write_new(Path::new("data/dictionary/rumah.json"), b"[]")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write_new(path: &Path, content: &[u8]) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let temp = write_temp_sibling(path, content)?;
    match temp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display())),
    }
}

fn write_temp_sibling(path: &Path, content: &[u8]) -> Result<tempfile::NamedTempFile> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    ensure_dir(parent)?;

    let mut temp = tempfile::NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in: {}", parent.display()))?;
    temp.write_all(content)
        .with_context(|| format!("Failed to write temp file for: {}", path.display()))?;
    temp.as_file().sync_all().context("Failed to sync file to disk")?;
    Ok(temp)
}
