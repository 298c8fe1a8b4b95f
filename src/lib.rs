//! claude-manager - safe editing of Claude Code's `~/.claude.json`
//!
//! The configuration document holds one record per project (interaction
//! history, MCP server definitions, trust flags) plus account-level fields.
//! This crate loads it, lets callers inspect and edit project records, and
//! writes it back without ever leaving a partially written file behind.
//!
//! # Architecture Overview
//!
//! - [`config::ConfigStore`] owns the in-memory document. Saves go through a
//!   temp-validate-rename sequence and are preceded by a timestamped backup.
//! - [`backup::BackupManager`] creates, lists and rotates backups (the ten
//!   most recent are kept).
//! - [`mcp::McpValidator`] checks MCP server blocks against a closed schema
//!   before they are stored, and flags well-known servers missing their
//!   environment variables.
//! - [`agents::AgentDiscovery`] reads sub-agent definitions from markdown
//!   front-matter, with project agents shadowing global ones.
//!
//! # Core Modules
//!
//! - [`core`] - error types and user-facing error formatting
//! - [`models`] - [`Project`](models::Project) and [`Agent`](models::Agent)
//! - [`config`] - paths, the store, stats and project analysis
//! - [`backup`] - backup rotation
//! - [`mcp`] - MCP server validation, typed configs and templates
//! - [`agents`] - agent discovery
//! - [`cli`] - the `claude-manager` command line
//! - [`utils`] - atomic writes and directory helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use claude_manager::config::{ConfigStore, ManagerPaths};
//! use claude_manager::mcp::{McpValidator, get_template};
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut store = ConfigStore::new(ManagerPaths::from_env()?);
//! store.load()?;
//!
//! let template = get_template("github").expect("built-in template");
//! if let Some(note) = McpValidator::validate(&template, "github")? {
//!     println!("{note}");
//! }
//!
//! if let Some(mut project) = store.get_project("/home/me/code/app") {
//!     project.set_mcp_server("github", template);
//!     store.update_project(&project);
//!     store.save(true)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod backup;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod mcp;
pub mod models;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
