//! The configuration document and everything derived from it.
//!
//! - [`paths`] - where the document, backups and global agents live
//! - [`store`] - load, atomic save, backup and restore of `~/.claude.json`
//! - [`stats`] - summary counts shown by the `stats` command
//! - [`analysis`] - per-project housekeeping report

pub mod analysis;
pub mod paths;
pub mod stats;
pub mod store;

pub use analysis::ProjectAnalysis;
pub use paths::{ManagerPaths, expand_path};
pub use stats::ConfigStats;
pub use store::ConfigStore;
