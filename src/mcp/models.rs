use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::collections::BTreeMap;

use crate::mcp::validator::{McpValidationError, McpValidator};

/// Typed view of a single MCP server entry in a project's `mcpServers`.
///
/// Mirrors the closed schema enforced by [`McpValidator`]: unknown keys are
/// rejected on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct McpServerConfig {
    /// The command to execute to start the server
    pub command: String,

    /// Arguments to pass to the command; an explicit empty list is kept
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<String>>,

    /// Environment variables to set when running the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env: Option<BTreeMap<String, String>>,

    /// Working directory for the server process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Startup timeout; kept as the original JSON number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<Number>,
}

impl McpServerConfig {
    /// Create a configuration running `command` with `args`.
    ///
    /// No `args` key is written when `args` is empty.
    pub fn new<I, S>(command: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            command: command.into(),
            args: if args.is_empty() { None } else { Some(args) },
            env: None,
            cwd: None,
            timeout: None,
        }
    }

    /// Add an environment variable.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.get_or_insert_with(BTreeMap::new).insert(key.into(), value.into());
        self
    }

    /// Validate `value` and decode it into the typed form.
    pub fn from_value(value: &Value, server_name: &str) -> Result<Self, McpValidationError> {
        McpValidator::validate(value, server_name)?;
        serde_json::from_value(value.clone()).map_err(|e| McpValidationError::Decode(e.to_string()))
    }

    /// Encode as the JSON object stored in the document.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// `command arg1 arg2 ...` for display.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().flatten().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
