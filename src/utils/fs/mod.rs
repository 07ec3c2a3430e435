//! File system helpers for the artifact cache and word list.
//!
//! Writes go through a temporary sibling file and a rename, so a reader
//! either sees a complete artifact or none at all.

pub mod atomic;
pub mod dirs;

pub use atomic::atomic_write_new;
pub use dirs::ensure_dir;
