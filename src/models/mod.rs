//! Shared value types passed between the store and its consumers.
//!
//! - [`Project`] - one entry of the `projects` mapping in `~/.claude.json`
//! - [`Agent`] - a sub-agent definition read from a markdown file

pub mod agent;
pub mod project;

pub use agent::{Agent, AgentType};
pub use project::Project;
