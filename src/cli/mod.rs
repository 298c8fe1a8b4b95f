//! Command-line interface for claude-manager.
//!
//! The CLI is a thin consumer of [`ConfigStore`](crate::config::ConfigStore):
//! every command loads the document, calls store methods and, for mutating
//! commands, saves it back (with a backup unless `--no-backup` is given).
//!
//! # Commands
//!
//! - `projects`, `show`, `remove`, `clear-history`, `analyze`, `stats`
//! - `backup create | list | restore | delete`
//! - `mcp list | add | remove | validate | templates | toggle-all`
//! - `agents`
//!
//! # Global options
//!
//! - `-c, --config <PATH>` - configuration file (default `~/.claude.json`)
//! - `--no-backup` - skip the backup normally taken before saving
//! - `-v, --verbose` / `-q, --quiet` - log level `debug` / `error`

mod agents;
mod backup;
mod mcp;
mod projects;

use crate::config::{ConfigStore, ManagerPaths};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

pub use agents::AgentsCommand;
pub use backup::BackupCommand;
pub use mcp::McpCommand;
pub use projects::{
    AnalyzeCommand, ClearHistoryCommand, ProjectsCommand, RemoveCommand, ShowCommand,
    StatsCommand,
};

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "claude-manager",
    about = "Manage Claude Code projects, MCP servers, agents and backups",
    version,
    long_about = "Inspect and edit ~/.claude.json safely: every save is atomic and preceded by a timestamped backup."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<String>,

    /// Do not back up the configuration before saving
    #[arg(long, global = true)]
    no_backup: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List projects
    Projects(ProjectsCommand),
    /// Show a single project
    Show(ShowCommand),
    /// Remove a project from the configuration
    Remove(RemoveCommand),
    /// Clear or trim a project's history
    ClearHistory(ClearHistoryCommand),
    /// Report projects with missing directories, no or large history
    Analyze(AnalyzeCommand),
    /// Show configuration statistics
    Stats(StatsCommand),
    /// Create, list and restore backups
    Backup(BackupCommand),
    /// Manage per-project MCP servers
    Mcp(McpCommand),
    /// List global and project agents
    Agents(AgentsCommand),
}

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub paths: ManagerPaths,
    pub create_backup: bool,
}

impl CommandContext {
    /// A store over the configured paths, without reading the file.
    #[must_use]
    pub fn store(&self) -> ConfigStore {
        ConfigStore::new(self.paths.clone())
    }

    /// A store with the configuration file loaded.
    pub fn load_store(&self) -> Result<ConfigStore> {
        let mut store = self.store();
        store.load().with_context(|| {
            format!("Cannot load configuration {}", self.paths.config_file.display())
        })?;
        Ok(store)
    }

    /// Save `store`, backing up first unless disabled.
    pub fn save(&self, store: &ConfigStore) -> Result<()> {
        store.save(self.create_backup).context("Cannot save configuration")
    }
}

impl Cli {
    /// Log filter directive selected by the verbosity flags.
    ///
    /// `None` means no flag was given and `RUST_LOG` (or the default) applies.
    #[must_use]
    pub const fn log_level(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }

    /// Resolve paths from the environment and the `--config` flag.
    pub fn build_context(&self) -> Result<CommandContext> {
        let mut paths = ManagerPaths::from_env().context("Cannot determine default paths")?;
        if let Some(config) = &self.config {
            paths = paths.with_config_file(config);
        }
        debug!("Using configuration file {}", paths.config_file.display());

        Ok(CommandContext {
            paths,
            create_backup: !self.no_backup,
        })
    }

    /// Run the selected command.
    pub fn execute(self) -> Result<()> {
        let ctx = self.build_context()?;
        self.execute_with_context(&ctx)
    }

    /// Run the selected command against explicit paths.
    pub fn execute_with_context(self, ctx: &CommandContext) -> Result<()> {
        match self.command {
            Commands::Projects(cmd) => cmd.execute(ctx),
            Commands::Show(cmd) => cmd.execute(ctx),
            Commands::Remove(cmd) => cmd.execute(ctx),
            Commands::ClearHistory(cmd) => cmd.execute(ctx),
            Commands::Analyze(cmd) => cmd.execute(ctx),
            Commands::Stats(cmd) => cmd.execute(ctx),
            Commands::Backup(cmd) => cmd.execute(ctx),
            Commands::Mcp(cmd) => cmd.execute(ctx),
            Commands::Agents(cmd) => cmd.execute(ctx),
        }
    }
}

/// `1536` -> `1.5 KB`
pub(crate) fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    #[allow(clippy::cast_precision_loss)]
    let bytes = bytes as f64;
    if bytes < KB {
        format!("{bytes} B")
    } else if bytes < KB * KB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / KB / KB)
    }
}
