//! Exclusive lock over a journal's `.mindmate/` directory

use crate::error::{MindmateError, Result};
use fd_lock::RwLock;
use std::fs::OpenOptions;
use std::path::Path;

const LOCK_FILE: &str = "lock";

/// Run `f` while holding the exclusive lock on `dir`
///
/// Blocks until any other holder, in this or another process, releases it.
pub fn with_exclusive_lock<T>(dir: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .write(true)
        .open(dir.join(LOCK_FILE))?;

    let mut lock = RwLock::new(file);
    let _guard = lock.write().map_err(|e| {
        MindmateError::Store(format!("Failed to lock {}: {}", dir.display(), e))
    })?;
    f()
}
