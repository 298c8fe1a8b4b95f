//! Atomic file write operations using a temp-validate-rename strategy.
//!
//! The live file is only ever replaced by a rename of a fully written,
//! synced and validated sibling file, so readers never observe a partial
//! write and a failed write leaves the original untouched.

use crate::core::{ManagerError, ManagerResult};
use crate::utils::fs::dirs::ensure_parent_dir;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the temporary sibling used while writing `path`.
///
/// The temp file lives in the same directory as the target (its extension is
/// replaced by `tmp`) so the final rename never crosses file systems.
#[must_use]
pub fn temp_path_for(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// Equivalent to [`atomic_write_validated`] with a validator that accepts
/// everything.
///
/// # Examples
///
/// ```rust,no_run
/// use claude_manager::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> claude_manager::core::ManagerResult<()> {
/// atomic_write(Path::new("/tmp/settings.json"), b"{}")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> ManagerResult<()> {
    atomic_write_validated(path, content, |_| Ok(()))
}

/// Atomically writes bytes to `path`, running `validate` on the temp file
/// before it replaces the target.
///
/// Steps:
/// 1. Create the parent directory if needed
/// 2. Write `content` to [`temp_path_for`]`(path)` and sync it to disk
/// 3. Call `validate` with the temp path
/// 4. Rename the temp file over `path`
///
/// If any step fails the temp file is removed and `path` is left exactly as it
/// was; the error from the failing step is returned.
pub fn atomic_write_validated<F>(path: &Path, content: &[u8], validate: F) -> ManagerResult<()>
where
    F: FnOnce(&Path) -> ManagerResult<()>,
{
    ensure_parent_dir(path)?;

    let temp_path = temp_path_for(path);
    let result = write_and_sync(&temp_path, content)
        .and_then(|()| validate(&temp_path))
        .and_then(|()| {
            fs::rename(&temp_path, path)
                .map_err(|e| ManagerError::io("renaming temp file over", path, e))
        });

    if result.is_err() && temp_path.is_file() {
        debug!("Removing temp file {}", temp_path.display());
        // The original error is the one worth reporting.
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(temp_path: &Path, content: &[u8]) -> ManagerResult<()> {
    let mut file = fs::File::create(temp_path)
        .map_err(|e| ManagerError::io("creating temp file", temp_path, e))?;

    file.write_all(content).map_err(|e| ManagerError::io("writing temp file", temp_path, e))?;

    file.sync_all().map_err(|e| ManagerError::io("syncing temp file", temp_path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_basic() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("atomic.json");

        atomic_write(&file, b"{\"a\": 1}").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{\"a\": 1}");
        assert!(!temp_path_for(&file).exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("atomic.json");

        atomic_write(&file, b"initial").unwrap();
        atomic_write(&file, b"updated").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "updated");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("deep").join("nested").join("atomic.json");

        atomic_write(&file, b"nested").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "nested");
    }

    #[test]
    fn test_failed_validation_leaves_original_untouched() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("config.json");
        std::fs::write(&file, "original").unwrap();
        let before = std::fs::metadata(&file).unwrap().modified().unwrap();

        let result = atomic_write_validated(&file, b"replacement", |p| {
            Err(ManagerError::parse(p, "rejected by test"))
        });

        assert!(matches!(result, Err(ManagerError::ParseError { .. })));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "original");
        assert_eq!(std::fs::metadata(&file).unwrap().modified().unwrap(), before);
        assert!(!temp_path_for(&file).exists());
    }

    #[test]
    fn test_validator_sees_written_content() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("config.json");

        atomic_write_validated(&file, b"payload", |p| {
            assert_eq!(std::fs::read(p).unwrap(), b"payload");
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_temp_creation_failure_reports_io_failure() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("config.json");
        std::fs::write(&file, "original").unwrap();
        // A directory squatting on the temp path makes File::create fail.
        std::fs::create_dir(temp_path_for(&file)).unwrap();

        let result = atomic_write(&file, b"new");
        assert!(matches!(result, Err(ManagerError::IoFailure { .. })));
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "original");
    }
}
