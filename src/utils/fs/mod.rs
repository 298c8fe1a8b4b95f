//! File system utilities.
//!
//! - [`atomic`] - temp-validate-rename writes that never leave a partial file
//! - [`dirs`] - directory creation helpers
//! - [`read_json_value`] - read and decode a JSON file with typed errors

pub mod atomic;
pub mod dirs;

pub use atomic::{atomic_write, atomic_write_validated, temp_path_for};
pub use dirs::{ensure_dir, ensure_parent_dir};

use crate::core::{ManagerError, ManagerResult};
use std::path::Path;

/// Reads `path` and decodes it as JSON.
///
/// Maps a missing file to [`ManagerError::NotFound`], other read failures to
/// [`ManagerError::IoFailure`] and decoding failures to
/// [`ManagerError::ParseError`].
pub fn read_json_value(path: &Path) -> ManagerResult<serde_json::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ManagerError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManagerError::io("reading", path, e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| ManagerError::parse(path, e))
}
