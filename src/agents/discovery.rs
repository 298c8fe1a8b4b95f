//! Merged view of global and project agents.

use crate::agents::frontmatter::{FrontmatterDecoder, YamlFrontmatter};
use crate::agents::parser::parse_agent_file;
use crate::constants::{AGENTS_DIR_NAME, CLAUDE_DIR_NAME};
use crate::models::{Agent, AgentType};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Scans agent directories on demand. Nothing is cached between calls.
#[derive(Debug)]
pub struct AgentDiscovery {
    global_dir: PathBuf,
    decoder: Box<dyn FrontmatterDecoder>,
}

impl AgentDiscovery {
    /// Discovery rooted at `global_dir` with YAML front-matter.
    pub fn new(global_dir: impl Into<PathBuf>) -> Self {
        Self::with_decoder(global_dir, Box::new(YamlFrontmatter))
    }

    /// Discovery with a custom front-matter decoder.
    pub fn with_decoder(global_dir: impl Into<PathBuf>, decoder: Box<dyn FrontmatterDecoder>) -> Self {
        Self {
            global_dir: global_dir.into(),
            decoder,
        }
    }

    /// The global agents directory.
    #[must_use]
    pub fn global_dir(&self) -> &Path {
        &self.global_dir
    }

    /// Agents keyed by name.
    ///
    /// Global agents are read first; when `project_path` is given, agents in
    /// `<project>/.claude/agents` are read next and replace global agents of
    /// the same name. Files that fail to parse are skipped with a warning.
    #[must_use]
    pub fn get_agents(&self, project_path: Option<&Path>) -> BTreeMap<String, Agent> {
        let mut agents = BTreeMap::new();
        self.scan_into(&self.global_dir, AgentType::Global, &mut agents);

        if let Some(project) = project_path {
            let dir = project_agents_dir(project);
            self.scan_into(&dir, AgentType::Project, &mut agents);
        }

        agents
    }

    fn scan_into(&self, dir: &Path, agent_type: AgentType, agents: &mut BTreeMap<String, Agent>) {
        for file in agent_files(dir) {
            match parse_agent_file(&file, agent_type, self.decoder.as_ref()) {
                Ok(agent) => {
                    if let Some(shadowed) = agents.insert(agent.name.clone(), agent) {
                        debug!("Agent '{}' from {} overridden", shadowed.name, shadowed.file_path.display());
                    }
                }
                Err(e) => warn!("Skipping agent file: {e}"),
            }
        }
    }
}

/// `<project>/.claude/agents`
#[must_use]
pub fn project_agents_dir(project: &Path) -> PathBuf {
    project.join(CLAUDE_DIR_NAME).join(AGENTS_DIR_NAME)
}

/// `*.md` files directly inside `dir`, sorted by file name.
fn agent_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        return Vec::new();
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read agents directory {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();
    files
}
