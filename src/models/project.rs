//! Project records stored under the `projects` key of `~/.claude.json`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

/// A single project entry, keyed by its absolute path in the document.
///
/// The seven known keys are decoded into typed fields; every other key of the
/// record is kept in [`Project::extra`] and written back unchanged, so
/// [`Project::from_value`] followed by [`Project::to_value`] never loses data.
///
/// `null` in any known collection field decodes to the empty collection and is
/// never written back as `null`.
///
/// # Examples
///
/// ```rust
/// use claude_manager::models::Project;
/// use serde_json::json;
///
/// let project = Project::from_value(
///     "/home/me/code/app",
///     json!({
///         "history": [{"display": "fix the build"}],
///         "mcpServers": null,
///         "allowedTools": ["Bash"]
///     }),
/// )
/// .unwrap();
///
/// assert_eq!(project.history_count(), 1);
/// assert!(project.mcp_servers.is_empty());
/// assert_eq!(project.to_value()["allowedTools"], json!(["Bash"]));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Absolute project path; the record's identity and its key in the document.
    #[serde(skip)]
    pub path: String,

    /// Interaction log, oldest first. Each entry is an object with at least a
    /// `display` string.
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<Value>,

    /// MCP server configurations keyed by server name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mcp_servers: Map<String, Value>,

    /// Servers from `.mcp.json` explicitly enabled for this project.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled_mcpjson_servers: Vec<String>,

    /// Servers from `.mcp.json` explicitly disabled for this project.
    #[serde(default, deserialize_with = "null_as_default")]
    pub disabled_mcpjson_servers: Vec<String>,

    /// Enable every `.mcp.json` server by default.
    #[serde(default, deserialize_with = "null_as_default")]
    pub enable_all_project_mcp_servers: bool,

    /// Context URIs handed to MCP servers; order kept, duplicates allowed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mcp_context_uris: Vec<String>,

    /// Whether the trust dialog was accepted for this directory.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_trust_dialog_accepted: bool,

    /// Live filesystem check, recomputed on every materialization. Never persisted.
    #[serde(skip)]
    pub directory_exists: bool,

    /// Keys this crate does not interpret, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Project {
    /// Create an empty project record for `path`.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let directory_exists = Path::new(&path).exists();
        Self {
            path,
            directory_exists,
            ..Self::default()
        }
    }

    /// Decode a project record from its JSON value.
    ///
    /// `directory_exists` is computed from the filesystem at call time.
    pub fn from_value(path: impl Into<String>, value: Value) -> serde_json::Result<Self> {
        let mut project: Self = serde_json::from_value(value)?;
        project.path = path.into();
        project.directory_exists = Path::new(&project.path).exists();
        Ok(project)
    }

    /// Encode the record as the JSON object stored in the document.
    #[must_use]
    pub fn to_value(&self) -> Value {
        // Serialization of plain maps, vectors and booleans cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }

    /// Number of history entries.
    #[must_use]
    pub fn history_count(&self) -> usize {
        self.history.len()
    }

    /// Approximate size in bytes of the record inside the document.
    #[must_use]
    pub fn size_estimate(&self) -> usize {
        serde_json::to_string(self).map(|s| s.len()).unwrap_or(0)
    }

    /// `display` strings of the last `n` history entries, oldest first.
    ///
    /// Entries without a string `display` field are shown as an empty string.
    pub fn recent_history_displays(&self, n: usize) -> Vec<&str> {
        let start = self.history.len().saturating_sub(n);
        self.history[start..]
            .iter()
            .map(|entry| entry.get("display").and_then(Value::as_str).unwrap_or(""))
            .collect()
    }

    /// Remove every history entry, returning how many were removed.
    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }

    /// Keep only the `keep` most recent history entries.
    ///
    /// Returns the number of entries removed; zero when `keep` is at least the
    /// current count.
    pub fn keep_recent_history(&mut self, keep: usize) -> usize {
        if keep >= self.history.len() {
            return 0;
        }
        let removed = self.history.len() - keep;
        self.history.drain(..removed);
        removed
    }

    /// Insert or replace the configuration of server `name`.
    pub fn set_mcp_server(&mut self, name: impl Into<String>, config: Value) {
        self.mcp_servers.insert(name.into(), config);
    }

    /// Remove server `name`, returning its configuration if it existed.
    pub fn remove_mcp_server(&mut self, name: &str) -> Option<Value> {
        self.mcp_servers.shift_remove(name)
    }

    /// Store `config` under `new_name`, dropping `old_name` if it differs.
    pub fn rename_mcp_server(&mut self, old_name: &str, new_name: &str, config: Value) {
        if old_name != new_name {
            self.mcp_servers.shift_remove(old_name);
        }
        self.mcp_servers.insert(new_name.to_string(), config);
    }

    /// Flip `enable_all_project_mcp_servers`, returning the new value.
    pub fn toggle_enable_all_mcp_servers(&mut self) -> bool {
        self.enable_all_project_mcp_servers = !self.enable_all_project_mcp_servers;
        self.enable_all_project_mcp_servers
    }
}
