//! Agent discovery from markdown files.
//!
//! Agents live in `~/.claude/agents/*.md` (global) and
//! `<project>/.claude/agents/*.md` (project). Each file carries its attributes
//! in a front-matter block; see [`frontmatter`] for the layout.

pub mod discovery;
pub mod frontmatter;
pub mod parser;

pub use discovery::{AgentDiscovery, project_agents_dir};
pub use frontmatter::{FrontmatterDecoder, YamlFrontmatter, extract_frontmatter};
pub use parser::parse_agent_file;
