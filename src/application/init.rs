//! Initialize journal use case

use crate::error::Result;
use crate::infrastructure::{Config, FileStore};
use std::fs;
use std::path::Path;

/// Initialize a new mood journal at the specified path.
pub fn init(path: &Path, config: &Config) -> Result<FileStore> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let store = FileStore::initialize(path, config)?;
    tracing::info!(root = %path.display(), "initialized mood journal");
    Ok(store)
}
