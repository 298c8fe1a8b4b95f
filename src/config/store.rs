//! The in-memory configuration document and its persistence lifecycle.
//!
//! [`ConfigStore`] owns the parsed `~/.claude.json` document. Callers read
//! projects out of it, stage changes with [`ConfigStore::update_project`] and
//! [`ConfigStore::remove_project`], then persist with [`ConfigStore::save`].
//!
//! # Save protocol
//!
//! 1. Optionally copy the current file into the backup directory (and rotate)
//! 2. Write the document to a sibling `.tmp` file and sync it
//! 3. Re-parse the `.tmp` file
//! 4. Rename it over the live file
//!
//! A failure at any step leaves the live file untouched.
//!
//! # Failure reporting
//!
//! Every operation returns a [`ManagerResult`] and logs failures with
//! `tracing::error!` before handing them back. Nothing here panics or exits;
//! the front-end decides what is fatal.
//!
//! # Examples
//!
//! ```rust,no_run
//! use claude_manager::config::{ConfigStore, ManagerPaths};
//!
//! # fn example() -> claude_manager::core::ManagerResult<()> {
//! let mut store = ConfigStore::new(ManagerPaths::from_env()?);
//! store.load()?;
//!
//! let mut projects = store.get_projects();
//! if let Some(project) = projects.get_mut("/home/me/code/app") {
//!     project.keep_recent_history(20);
//!     store.update_project(project);
//! }
//! store.save(true)?;
//! # Ok(())
//! # }
//! ```

use crate::agents::AgentDiscovery;
use crate::backup::{BackupInfo, BackupManager};
use crate::config::analysis::ProjectAnalysis;
use crate::config::paths::ManagerPaths;
use crate::config::stats::ConfigStats;
use crate::core::{ManagerError, ManagerResult};
use crate::models::{Agent, Project};
use crate::utils::fs::{atomic_write, atomic_write_validated, read_json_value};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

const PROJECTS_KEY: &str = "projects";

/// Owner of the configuration document.
#[derive(Debug)]
pub struct ConfigStore {
    paths: ManagerPaths,
    document: Map<String, Value>,
    backups: BackupManager,
    agents: AgentDiscovery,
}

impl ConfigStore {
    /// A store with an empty document. Call [`load`](Self::load) to read the file.
    #[must_use]
    pub fn new(paths: ManagerPaths) -> Self {
        let backups = BackupManager::new(&paths.backup_dir);
        let agents = AgentDiscovery::new(&paths.global_agents_dir);
        Self {
            paths,
            document: Map::new(),
            backups,
            agents,
        }
    }

    /// Replace the backup manager, e.g. to change retention.
    #[must_use]
    pub fn with_backup_manager(mut self, backups: BackupManager) -> Self {
        self.backups = backups;
        self
    }

    /// Replace agent discovery, e.g. to plug in another front-matter decoder.
    #[must_use]
    pub fn with_agent_discovery(mut self, agents: AgentDiscovery) -> Self {
        self.agents = agents;
        self
    }

    #[must_use]
    pub fn paths(&self) -> &ManagerPaths {
        &self.paths
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.paths.config_file
    }

    /// The raw in-memory document.
    #[must_use]
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Read and parse the configuration file into memory.
    ///
    /// On failure the in-memory document is reset to empty and the error is
    /// returned: [`ManagerError::NotFound`] for a missing file,
    /// [`ManagerError::ParseError`] for invalid JSON and
    /// [`ManagerError::SchemaError`] when the top level is not an object.
    pub fn load(&mut self) -> ManagerResult<()> {
        let path = self.paths.config_file.clone();
        let result = read_json_value(&path).and_then(|value| match value {
            Value::Object(document) => Ok(document),
            _ => Err(ManagerError::schema(&path, "top level is not a JSON object")),
        });

        match result {
            Ok(document) => {
                self.document = document;
                info!("Loaded configuration from {}", path.display());
                Ok(())
            }
            Err(e) => {
                self.document = Map::new();
                error!("Failed to load configuration: {e}");
                Err(e)
            }
        }
    }

    /// Persist the in-memory document.
    ///
    /// With `create_backup`, the current file is backed up first and a backup
    /// failure aborts the save. The write itself is atomic; see the module
    /// docs.
    pub fn save(&self, create_backup: bool) -> ManagerResult<()> {
        if create_backup {
            self.create_backup()?;
        }

        let path = &self.paths.config_file;
        let result = serde_json::to_vec_pretty(&self.document)
            .map_err(|e| ManagerError::schema(path, e.to_string()))
            .and_then(|content| {
                atomic_write_validated(path, &content, |temp| read_json_value(temp).map(drop))
            });

        match result {
            Ok(()) => {
                info!("Saved configuration to {}", path.display());
                Ok(())
            }
            Err(e) => {
                error!("Failed to save configuration: {e}");
                Err(e)
            }
        }
    }

    /// Back up the current configuration file.
    ///
    /// Returns `Ok(None)` when there is no file to back up.
    pub fn create_backup(&self) -> ManagerResult<Option<PathBuf>> {
        self.backups
            .create(&self.paths.config_file)
            .inspect_err(|e| error!("Failed to create backup: {e}"))
    }

    /// Replace the live file with `backup_path` and reload.
    ///
    /// No backup of the current file is taken first.
    pub fn restore_from_backup(&mut self, backup_path: &Path) -> ManagerResult<()> {
        if !backup_path.is_file() {
            let e = ManagerError::NotFound {
                path: backup_path.to_path_buf(),
            };
            error!("Failed to restore backup: {e}");
            return Err(e);
        }

        let config_path = self.paths.config_file.clone();
        let copied = fs::read(backup_path)
            .map_err(|e| ManagerError::io("reading backup", backup_path, e))
            .and_then(|content| atomic_write(&config_path, &content))
            .and_then(|()| {
                if config_path.is_file() {
                    Ok(())
                } else {
                    Err(ManagerError::NotFound {
                        path: config_path.clone(),
                    })
                }
            });
        if let Err(e) = copied {
            error!("Failed to restore backup: {e}");
            return Err(e);
        }

        self.load()?;
        info!("Restored configuration from {}", backup_path.display());
        Ok(())
    }

    /// Delete one backup file from the backup directory.
    pub fn delete_backup(&self, backup_path: &Path) -> ManagerResult<()> {
        self.backups.delete(backup_path).inspect_err(|e| error!("Failed to delete backup: {e}"))
    }

    /// Backup paths, most recent first.
    pub fn get_backups(&self) -> ManagerResult<Vec<PathBuf>> {
        self.backups.list().inspect_err(|e| error!("Failed to list backups: {e}"))
    }

    /// Backups with size and timestamp, most recent first.
    pub fn get_backup_info(&self) -> ManagerResult<Vec<BackupInfo>> {
        self.backups.list_info().inspect_err(|e| error!("Failed to list backups: {e}"))
    }

    /// Directory backups are written to.
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        self.backups.dir()
    }

    /// Materialize every project record, keyed by path.
    ///
    /// Entries that are not objects or fail to decode are skipped with a
    /// warning.
    #[must_use]
    pub fn get_projects(&self) -> BTreeMap<String, Project> {
        let Some(entries) = self.document.get(PROJECTS_KEY).and_then(Value::as_object) else {
            return BTreeMap::new();
        };

        let mut projects = BTreeMap::new();
        for (path, value) in entries {
            if !value.is_object() {
                warn!("Skipping project '{path}': record is not an object");
                continue;
            }
            match Project::from_value(path.clone(), value.clone()) {
                Ok(project) => {
                    projects.insert(path.clone(), project);
                }
                Err(e) => warn!("Skipping project '{path}': {e}"),
            }
        }
        projects
    }

    /// A single project by path.
    #[must_use]
    pub fn get_project(&self, path: &str) -> Option<Project> {
        let value = self.document.get(PROJECTS_KEY)?.get(path)?;
        if !value.is_object() {
            return None;
        }
        Project::from_value(path, value.clone()).ok()
    }

    /// Stage `project` in memory, inserting or replacing the record at its path.
    ///
    /// Keys of the record this crate does not interpret are kept as they were
    /// in `project.extra`.
    pub fn update_project(&mut self, project: &Project) {
        let entry = self
            .document
            .entry(PROJECTS_KEY)
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            warn!("Replacing non-object '{PROJECTS_KEY}' value");
            *entry = Value::Object(Map::new());
        }
        if let Value::Object(projects) = entry {
            projects.insert(project.path.clone(), project.to_value());
            debug!("Updated project {}", project.path);
        }
    }

    /// Remove the project at `path` from memory. Returns whether it existed.
    pub fn remove_project(&mut self, path: &str) -> bool {
        let removed = self
            .document
            .get_mut(PROJECTS_KEY)
            .and_then(Value::as_object_mut)
            .and_then(|projects| projects.shift_remove(path))
            .is_some();
        if removed {
            debug!("Removed project {path}");
        }
        removed
    }

    /// Size of the configuration file on disk, 0 if it does not exist.
    #[must_use]
    pub fn config_size(&self) -> u64 {
        fs::metadata(&self.paths.config_file).map(|m| m.len()).unwrap_or(0)
    }

    /// Aggregated counts over the current document.
    #[must_use]
    pub fn get_stats(&self) -> ConfigStats {
        ConfigStats::compute(&self.document, &self.get_projects(), self.config_size())
    }

    /// Housekeeping report over all projects.
    #[must_use]
    pub fn analyze_projects(&self) -> ProjectAnalysis {
        ProjectAnalysis::analyze(&self.get_projects())
    }

    /// Global agents merged with the project's own, keyed by name.
    #[must_use]
    pub fn get_agents(&self, project_path: Option<&Path>) -> BTreeMap<String, Agent> {
        self.agents.get_agents(project_path)
    }
}
