//! MCP (Model Context Protocol) server configuration handling.
//!
//! Projects in `~/.claude.json` carry an `mcpServers` mapping of server name to
//! a command-based configuration block:
//!
//! ```json
//! {
//!   "command": "npx",
//!   "args": ["-y", "@modelcontextprotocol/server-github"],
//!   "env": { "GITHUB_TOKEN": "ghp_..." },
//!   "cwd": "/home/me",
//!   "timeout": 30
//! }
//! ```
//!
//! This module provides:
//! - [`McpValidator`] - closed-schema validation run before a block is persisted
//! - [`McpServerConfig`] - typed view of a validated block
//! - [`templates`] - canned blocks for common servers

pub mod models;
pub mod templates;
pub mod validator;


pub use models::McpServerConfig;
pub use templates::{get_template, list_templates};
pub use validator::{McpValidationError, McpValidator, ValidationResult, known_server_warnings};
