//! Timestamped backups of the configuration document.
//!
//! Each backup is a byte-for-byte copy of the live file named
//! `<prefix>_<YYYYMMDD_HHMMSS_ffffff>.json`. The timestamp is fixed width, so
//! sorting file names sorts backups chronologically; listing and rotation both
//! rely on that.
//!
//! After every new backup the set is trimmed to the most recent
//! [`MAX_BACKUPS`](crate::constants::MAX_BACKUPS) files.

use crate::constants::{BACKUP_PREFIX, BACKUP_TIMESTAMP_FORMAT, MAX_BACKUPS};
use crate::core::{ManagerError, ManagerResult};
use crate::utils::fs::ensure_dir;
use chrono::{Duration, Local, NaiveDateTime, Timelike};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Creates, lists and rotates backups in a single directory.
#[derive(Debug, Clone)]
pub struct BackupManager {
    dir: PathBuf,
    prefix: String,
    keep: usize,
}

/// A backup file as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    /// Full path of the backup file
    pub path: PathBuf,
    /// File name, e.g. `claude_20240101_120000_000001.json`
    pub file_name: String,
    /// Size in bytes
    pub size: u64,
    /// Timestamp decoded from the file name, if it is well formed
    pub created: Option<NaiveDateTime>,
}

impl BackupManager {
    /// Backups in `dir` with the default prefix and retention.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: BACKUP_PREFIX.to_string(),
            keep: MAX_BACKUPS,
        }
    }

    /// Override how many backups rotation keeps.
    #[must_use]
    pub fn with_retention(mut self, keep: usize) -> Self {
        self.keep = keep;
        self
    }

    /// The backup directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Copy `source` into a new backup file and rotate.
    ///
    /// Returns `Ok(None)` without touching the backup directory when `source`
    /// does not exist.
    pub fn create(&self, source: &Path) -> ManagerResult<Option<PathBuf>> {
        if !source.is_file() {
            debug!("No file at {}, skipping backup", source.display());
            return Ok(None);
        }

        ensure_dir(&self.dir)?;
        let backup_path = self.next_backup_path(Local::now().naive_local());
        fs::copy(source, &backup_path)
            .map_err(|e| ManagerError::io("copying backup to", &backup_path, e))?;
        info!("Created backup: {}", backup_path.display());

        self.prune()?;
        Ok(Some(backup_path))
    }

    /// First unused backup path at or after `now`.
    ///
    /// Two backups within the same microsecond would collide, so the
    /// timestamp is advanced until the name is free.
    fn next_backup_path(&self, mut now: NaiveDateTime) -> PathBuf {
        loop {
            let candidate = self.dir.join(self.file_name_for(now));
            if !candidate.exists() {
                return candidate;
            }
            now += Duration::microseconds(1);
        }
    }

    fn file_name_for(&self, timestamp: NaiveDateTime) -> String {
        format!("{}_{}.json", self.prefix, timestamp.format(BACKUP_TIMESTAMP_FORMAT))
    }

    /// Backup paths, most recent first.
    pub fn list(&self) -> ManagerResult<Vec<PathBuf>> {
        let mut paths = self.list_oldest_first()?;
        paths.reverse();
        Ok(paths)
    }

    /// Backup paths with size and decoded timestamp, most recent first.
    pub fn list_info(&self) -> ManagerResult<Vec<BackupInfo>> {
        self.list()?
            .into_iter()
            .map(|path| {
                let size = fs::metadata(&path)
                    .map_err(|e| ManagerError::io("reading metadata of", &path, e))?
                    .len();
                let file_name =
                    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                let created = self.parse_timestamp(&file_name);
                Ok(BackupInfo {
                    path,
                    file_name,
                    size,
                    created,
                })
            })
            .collect()
    }

    fn list_oldest_first(&self) -> ManagerResult<Vec<PathBuf>> {
        if !self.dir.is_dir() {
            return Ok(Vec::new());
        }

        let pattern = format!(
            "{}/{}_*.json",
            glob::Pattern::escape(&self.dir.to_string_lossy()),
            glob::Pattern::escape(&self.prefix)
        );
        let entries =
            glob::glob(&pattern).map_err(|e| ManagerError::schema(&self.dir, e.to_string()))?;

        let mut paths = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() => paths.push(path),
                Ok(_) => {}
                Err(e) => warn!("Skipping unreadable backup entry: {e}"),
            }
        }
        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }

    /// Delete the oldest backups beyond the retention count.
    ///
    /// Returns the number of files deleted.
    pub fn prune(&self) -> ManagerResult<usize> {
        let paths = self.list_oldest_first()?;
        if paths.len() <= self.keep {
            return Ok(0);
        }

        let surplus = paths.len() - self.keep;
        for old in &paths[..surplus] {
            fs::remove_file(old).map_err(|e| ManagerError::io("deleting old backup", old, e))?;
            debug!("Deleted old backup: {}", old.display());
        }
        Ok(surplus)
    }

    /// Delete a single backup file.
    ///
    /// # Errors
    ///
    /// - [`ManagerError::NotFound`] if `backup` does not exist
    /// - [`ManagerError::SchemaError`] if it is not a backup file directly
    ///   inside [`dir`](Self::dir); nothing is deleted
    /// - [`ManagerError::IoFailure`] if the file cannot be removed
    pub fn delete(&self, backup: &Path) -> ManagerResult<()> {
        if !backup.is_file() {
            return Err(ManagerError::NotFound {
                path: backup.to_path_buf(),
            });
        }

        let parent = backup.parent().map(fs::canonicalize);
        let in_backup_dir = match (parent, fs::canonicalize(&self.dir)) {
            (Some(Ok(parent)), Ok(dir)) => parent == dir,
            _ => false,
        };
        let file_name =
            backup.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if !in_backup_dir || self.parse_timestamp(&file_name).is_none() {
            return Err(ManagerError::schema(
                backup,
                format!("not a backup file in {}", self.dir.display()),
            ));
        }

        fs::remove_file(backup).map_err(|e| ManagerError::io("deleting backup", backup, e))?;
        info!("Deleted backup: {}", backup.display());
        Ok(())
    }

    /// Decode the timestamp embedded in a backup file name.
    fn parse_timestamp(&self, file_name: &str) -> Option<NaiveDateTime> {
        let stamp = file_name
            .strip_prefix(self.prefix.as_str())?
            .strip_prefix('_')?
            .strip_suffix(".json")?;
        let (seconds_part, micros_part) = stamp.rsplit_once('_')?;
        if micros_part.len() != 6 {
            return None;
        }
        let micros: u32 = micros_part.parse().ok()?;
        NaiveDateTime::parse_from_str(seconds_part, "%Y%m%d_%H%M%S")
            .ok()?
            .with_nanosecond(micros * 1_000)
    }
}
