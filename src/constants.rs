//! Global constants used throughout claude-manager.
//!
//! File names, retention counts and thresholds that more than one module
//! depends on live here so they stay consistent.

/// Number of configuration backups kept by rotation.
///
/// After each backup the oldest files beyond this count are deleted.
pub const MAX_BACKUPS: usize = 10;

/// File name prefix for configuration backups (`claude_<timestamp>.json`).
pub const BACKUP_PREFIX: &str = "claude";

/// `chrono` format of the timestamp embedded in backup file names.
///
/// Fixed width with microsecond resolution, so lexical order of file names is
/// chronological order.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

/// Default configuration file name, relative to the home directory.
pub const CONFIG_FILE_NAME: &str = ".claude.json";

/// Default backup directory name, relative to the home directory.
pub const BACKUP_DIR_NAME: &str = ".claude_backups";

/// Directory (relative to home or a project root) holding `.claude` data.
pub const CLAUDE_DIR_NAME: &str = ".claude";

/// Agents subdirectory under [`CLAUDE_DIR_NAME`].
pub const AGENTS_DIR_NAME: &str = "agents";

/// Environment variable overriding the configuration file path.
pub const CONFIG_PATH_ENV: &str = "CLAUDE_MANAGER_CONFIG";

/// Environment variable overriding the backup directory.
pub const BACKUP_DIR_ENV: &str = "CLAUDE_MANAGER_BACKUP_DIR";

/// Environment variable overriding the global agents directory.
pub const AGENTS_DIR_ENV: &str = "CLAUDE_MANAGER_AGENTS_DIR";

/// Projects with more history entries than this are reported as large.
pub const LARGE_HISTORY_THRESHOLD: usize = 50;
