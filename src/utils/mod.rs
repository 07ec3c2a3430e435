//! Shared utilities.
//!
//! - [`fs`] - directory creation and atomic writes

pub mod fs;

pub use fs::{atomic_write_new, ensure_dir};
