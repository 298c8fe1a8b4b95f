//! Backup management commands.

use crate::cli::{CommandContext, format_size};
use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct BackupCommand {
    #[command(subcommand)]
    subcommand: BackupSubcommand,
}

#[derive(Subcommand, Debug)]
enum BackupSubcommand {
    /// Back up the current configuration file
    Create,
    /// List backups, most recent first
    List,
    /// Replace the configuration with a backup
    Restore {
        /// Backup file path, or a file name inside the backup directory
        backup: String,
    },
    /// Delete a single backup
    Delete {
        /// Backup file path, or a file name inside the backup directory
        backup: String,
    },
}

impl BackupCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        match self.subcommand {
            BackupSubcommand::Create => create(ctx),
            BackupSubcommand::List => list(ctx),
            BackupSubcommand::Restore {
                backup,
            } => restore(ctx, &backup),
            BackupSubcommand::Delete {
                backup,
            } => delete(ctx, &backup),
        }
    }
}

fn create(ctx: &CommandContext) -> Result<()> {
    let store = ctx.store();
    match store.create_backup().context("Cannot create backup")? {
        Some(path) => println!("{} Backup created: {}", "✓".green(), path.display()),
        None => println!("No configuration file at {}, nothing to back up.", store.config_path().display()),
    }
    Ok(())
}

fn list(ctx: &CommandContext) -> Result<()> {
    let store = ctx.store();
    let backups = store.get_backup_info().context("Cannot list backups")?;

    if backups.is_empty() {
        println!("No backups in {}", store.backup_dir().display());
        return Ok(());
    }

    println!("{}", format!("Backups in {} ({}):", store.backup_dir().display(), backups.len()).bold());
    for info in backups {
        let created = info
            .created
            .map_or_else(|| "unknown time".to_string(), |t| t.format("%Y-%m-%d %H:%M:%S").to_string());
        println!("  {}  {}  {}", info.file_name, created.dimmed(), format_size(info.size));
    }
    Ok(())
}

fn restore(ctx: &CommandContext, backup: &str) -> Result<()> {
    let mut store = ctx.store();
    let path = resolve_backup_path(store.backup_dir(), backup);
    if !path.is_file() {
        return Err(anyhow!("Backup not found: {backup}"));
    }

    store
        .restore_from_backup(&path)
        .with_context(|| format!("Cannot restore {}", path.display()))?;
    println!("{} Restored configuration from {}", "✓".green(), path.display());
    Ok(())
}

fn delete(ctx: &CommandContext, backup: &str) -> Result<()> {
    let store = ctx.store();
    let path = resolve_backup_path(store.backup_dir(), backup);
    if !path.is_file() {
        return Err(anyhow!("Backup not found: {backup}"));
    }

    store.delete_backup(&path).with_context(|| format!("Cannot delete {}", path.display()))?;
    println!("{} Deleted backup {}", "✓".green(), path.display());
    Ok(())
}

/// An existing path is taken as-is; otherwise the name is looked up in the
/// backup directory.
fn resolve_backup_path(backup_dir: &Path, backup: &str) -> PathBuf {
    let direct = PathBuf::from(backup);
    if direct.is_file() {
        direct
    } else {
        backup_dir.join(backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_backup_path() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("claude_x.json");
        std::fs::write(&file, "{}").unwrap();

        let direct = resolve_backup_path(Path::new("/elsewhere"), &file.to_string_lossy());
        assert_eq!(direct, file);

        let by_name = resolve_backup_path(temp.path(), "claude_y.json");
        assert_eq!(by_name, temp.path().join("claude_y.json"));
    }
}
