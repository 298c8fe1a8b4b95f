//! Integration test suite for claude-manager
//!
//! End-to-end tests through the public API and the `claude-manager` binary.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **store_lifecycle**: load/save round trips, atomic saves, backup rotation and restore
//! - **agents**: agent discovery and shadowing on disk
//! - **mcp_editing**: validating and storing MCP server blocks through the store
//! - **cli**: the command line binary

mod agents;
mod cli;
mod mcp_editing;
mod store_lifecycle;
