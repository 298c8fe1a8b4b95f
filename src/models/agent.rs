//! Agent records discovered from markdown files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Where an agent definition was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// `~/.claude/agents`
    Global,
    /// `<project>/.claude/agents`
    Project,
}

impl fmt::Display for AgentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => write!(f, "global"),
            Self::Project => write!(f, "project"),
        }
    }
}

/// A sub-agent definition parsed from a markdown file's front-matter.
///
/// Agents are never cached or written back; they are rebuilt from disk on each
/// lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    /// Agent name; the file stem when the front-matter has none.
    pub name: String,
    pub description: String,
    /// Tools the agent may use. Empty means all tools.
    pub tools: Vec<String>,
    pub file_path: PathBuf,
    pub agent_type: AgentType,
    pub color: Option<String>,
    pub priority: Option<String>,
    pub neural_patterns: Vec<String>,
    pub learning_enabled: bool,
    pub collective_memory: bool,
    pub hive_mind_role: Option<String>,
    pub concurrent_execution: bool,
    pub sparc_integration: bool,
}

impl Agent {
    /// Create an agent with only the basic attributes set.
    pub fn new(name: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tools: Vec::new(),
            file_path: PathBuf::new(),
            agent_type,
            color: None,
            priority: None,
            neural_patterns: Vec::new(),
            learning_enabled: false,
            collective_memory: false,
            hive_mind_role: None,
            concurrent_execution: false,
            sparc_integration: false,
        }
    }

    /// Human-readable tool list: `All tools` when unrestricted.
    #[must_use]
    pub fn tools_display(&self) -> String {
        if self.tools.is_empty() {
            "All tools".to_string()
        } else {
            self.tools.join(", ")
        }
    }

    /// Whether any of the extended (swarm/learning) attributes is set.
    #[must_use]
    pub fn is_advanced(&self) -> bool {
        !self.neural_patterns.is_empty()
            || self.learning_enabled
            || self.collective_memory
            || self.hive_mind_role.is_some()
            || self.concurrent_execution
            || self.sparc_integration
    }
}
