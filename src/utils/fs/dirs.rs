//! Directory creation helpers.

use crate::core::{ManagerError, ManagerResult};
use std::fs;
use std::path::Path;

/// Ensures a directory exists, creating it and its parents if necessary.
///
/// Fails with [`ManagerError::SchemaError`] if the path exists but is not a
/// directory.
pub fn ensure_dir(path: &Path) -> ManagerResult<()> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| ManagerError::io("creating directory", path, e))?;
    } else if !path.is_dir() {
        return Err(ManagerError::schema(path, "path exists but is not a directory"));
    }
    Ok(())
}

/// Ensures that the parent directory of a file path exists.
pub fn ensure_parent_dir(path: &Path) -> ManagerResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}
