//! Location of the configuration file, backups and global agents.
//!
//! Each path is resolved independently with the precedence
//! explicit value > environment variable > default under the home directory:
//!
//! | Path | Environment variable | Default |
//! |------|----------------------|---------|
//! | configuration file | `CLAUDE_MANAGER_CONFIG` | `~/.claude.json` |
//! | backup directory | `CLAUDE_MANAGER_BACKUP_DIR` | `~/.claude_backups` |
//! | global agents | `CLAUDE_MANAGER_AGENTS_DIR` | `~/.claude/agents` |

use crate::constants::{
    AGENTS_DIR_ENV, AGENTS_DIR_NAME, BACKUP_DIR_ENV, BACKUP_DIR_NAME, CLAUDE_DIR_NAME,
    CONFIG_FILE_NAME, CONFIG_PATH_ENV,
};
use crate::core::{ManagerError, ManagerResult};
use std::path::{Path, PathBuf};

/// Resolved file system locations used by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagerPaths {
    /// The JSON configuration document
    pub config_file: PathBuf,
    /// Directory holding timestamped backups
    pub backup_dir: PathBuf,
    /// Directory holding user-wide agent definitions
    pub global_agents_dir: PathBuf,
}

impl ManagerPaths {
    /// Paths rooted at `home`, ignoring the environment.
    #[must_use]
    pub fn under_home(home: &Path) -> Self {
        Self {
            config_file: home.join(CONFIG_FILE_NAME),
            backup_dir: home.join(BACKUP_DIR_NAME),
            global_agents_dir: home.join(CLAUDE_DIR_NAME).join(AGENTS_DIR_NAME),
        }
    }

    /// Paths from the process environment, falling back to the home directory.
    ///
    /// # Errors
    ///
    /// Fails when a path has no environment override and the home directory
    /// cannot be determined.
    pub fn from_env() -> ManagerResult<Self> {
        Self::resolve(|name| std::env::var(name).ok(), dirs::home_dir())
    }

    /// Resolve paths from an environment lookup and an optional home directory.
    ///
    /// Empty environment values are ignored. Values are tilde-expanded.
    pub fn resolve<F>(lookup: F, home: Option<PathBuf>) -> ManagerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_env = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .map(|value| expand_path(&value))
        };

        let config_file = from_env(CONFIG_PATH_ENV);
        let backup_dir = from_env(BACKUP_DIR_ENV);
        let global_agents_dir = from_env(AGENTS_DIR_ENV);

        if let (Some(config_file), Some(backup_dir), Some(global_agents_dir)) =
            (&config_file, &backup_dir, &global_agents_dir)
        {
            return Ok(Self {
                config_file: config_file.clone(),
                backup_dir: backup_dir.clone(),
                global_agents_dir: global_agents_dir.clone(),
            });
        }

        let home = home.ok_or_else(|| ManagerError::NotFound {
            path: PathBuf::from("~"),
        })?;
        let defaults = Self::under_home(&home);
        Ok(Self {
            config_file: config_file.unwrap_or(defaults.config_file),
            backup_dir: backup_dir.unwrap_or(defaults.backup_dir),
            global_agents_dir: global_agents_dir.unwrap_or(defaults.global_agents_dir),
        })
    }

    /// Replace the configuration file path (e.g. from `--config`).
    #[must_use]
    pub fn with_config_file(mut self, path: &str) -> Self {
        self.config_file = expand_path(path);
        self
    }
}

/// Expand a leading `~` to the home directory.
#[must_use]
pub fn expand_path(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
