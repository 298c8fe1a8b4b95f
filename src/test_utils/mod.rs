//! Shared helpers for unit and integration tests.
//!
//! Available in `cfg(test)` and with the `test-utils` feature.

use crate::config::{ConfigStore, ManagerPaths};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Once;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Uses `level` when given, otherwise `RUST_LOG` if it is set; with neither,
/// no subscriber is installed.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// An isolated home directory with the configuration file, backup directory
/// and global agents directory laid out the default way.
pub struct ConfigFixture {
    temp: TempDir,
    paths: ManagerPaths,
}

impl ConfigFixture {
    /// An empty home directory. No configuration file is written.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("create temp dir");
        let paths = ManagerPaths::under_home(temp.path());
        Self {
            temp,
            paths,
        }
    }

    /// A home directory whose configuration file contains `document`.
    pub fn with_document(document: &Value) -> Self {
        let fixture = Self::new();
        fixture.write_config(document);
        fixture
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        self.temp.path()
    }

    #[must_use]
    pub fn paths(&self) -> &ManagerPaths {
        &self.paths
    }

    #[must_use]
    pub fn config_path(&self) -> &Path {
        &self.paths.config_file
    }

    /// Overwrite the configuration file with pretty-printed `document`.
    pub fn write_config(&self, document: &Value) {
        let text = serde_json::to_string_pretty(document).expect("serialize document");
        fs::write(&self.paths.config_file, text).expect("write config");
    }

    /// Parse the configuration file as it is on disk.
    #[must_use]
    pub fn read_config(&self) -> Value {
        let text = fs::read_to_string(&self.paths.config_file).expect("read config");
        serde_json::from_str(&text).expect("config is valid JSON")
    }

    /// A store over the fixture paths, not yet loaded.
    #[must_use]
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.paths.clone())
    }

    /// A store with the configuration file loaded.
    #[must_use]
    pub fn loaded_store(&self) -> ConfigStore {
        let mut store = self.store();
        store.load().expect("load fixture config");
        store
    }

    /// Write an agent file into the global agents directory.
    pub fn write_global_agent(&self, file_name: &str, frontmatter: &str) -> PathBuf {
        write_agent(&self.paths.global_agents_dir, file_name, frontmatter)
    }

    /// Create a project directory under the fixture home and return its path.
    pub fn project_dir(&self, name: &str) -> PathBuf {
        let dir = self.temp.path().join("projects").join(name);
        fs::create_dir_all(&dir).expect("create project dir");
        dir
    }
}

impl Default for ConfigFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `<dir>/<file_name>` as a markdown file with the given front-matter body.
pub fn write_agent(dir: &Path, file_name: &str, frontmatter: &str) -> PathBuf {
    fs::create_dir_all(dir).expect("create agents dir");
    let path = dir.join(file_name);
    fs::write(&path, format!("---\n{frontmatter}\n---\n\nAgent instructions.\n")).expect("write agent");
    path
}
