//! Project listing, inspection and housekeeping commands.

use crate::cli::{CommandContext, format_size};
use crate::config::ConfigStore;
use crate::models::Project;
use anyhow::{Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::Path;

/// Entries shown per section of a report before eliding the rest.
const REPORT_LIMIT: usize = 10;

/// Recent history entries shown by `show`.
const RECENT_HISTORY: usize = 5;

#[derive(Args, Debug)]
pub struct ProjectsCommand {
    /// Show trust status and size for each project
    #[arg(long)]
    details: bool,
}

impl ProjectsCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.load_store()?;
        let projects = store.get_projects();

        if projects.is_empty() {
            println!("No projects found.");
            return Ok(());
        }

        println!("{}", format!("Projects ({}):", projects.len()).bold());
        for (path, project) in &projects {
            let status = if project.directory_exists {
                "exists".green()
            } else {
                "missing".red()
            };
            println!(
                "  {path}  [{status}]  history: {}  mcp servers: {}",
                project.history_count(),
                project.mcp_servers.len()
            );
            if self.details {
                println!(
                    "      trusted: {}  size: {}",
                    yes_no(project.has_trust_dialog_accepted),
                    format_size(project.size_estimate() as u64)
                );
            }
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Project path as stored in the configuration
    path: String,
}

impl ShowCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.load_store()?;
        let project = find_project(&store, &self.path)?;

        println!("{}", project.path.bold());
        println!(
            "  Directory: {}",
            if project.directory_exists {
                "exists".green()
            } else {
                "missing".red()
            }
        );
        println!("  Trust accepted: {}", yes_no(project.has_trust_dialog_accepted));
        println!("  History entries: {}", project.history_count());
        println!("  Estimated size: {}", format_size(project.size_estimate() as u64));
        println!(
            "  Enable all project MCP servers: {}",
            yes_no(project.enable_all_project_mcp_servers)
        );

        if !project.mcp_servers.is_empty() {
            println!("  MCP servers:");
            for name in project.mcp_servers.keys() {
                println!("    - {name}");
            }
        }

        let recent = project.recent_history_displays(RECENT_HISTORY);
        if !recent.is_empty() {
            println!("  Recent history:");
            for display in recent {
                println!("    - {display}");
            }
        }

        let agents = store.get_agents(Some(Path::new(&project.path)));
        if !agents.is_empty() {
            println!("  Agents: {}", agents.keys().cloned().collect::<Vec<_>>().join(", "));
        }
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct RemoveCommand {
    /// Project path to remove
    path: String,
}

impl RemoveCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let mut store = ctx.load_store()?;
        if !store.remove_project(&self.path) {
            return Err(anyhow!("Project not found: {}", self.path));
        }
        ctx.save(&store)?;
        println!("{} Removed project {}", "✓".green(), self.path);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ClearHistoryCommand {
    /// Project path
    path: String,

    /// Keep the N most recent entries instead of clearing everything
    #[arg(long, value_name = "N")]
    keep: Option<usize>,
}

impl ClearHistoryCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let mut store = ctx.load_store()?;
        let mut project = find_project(&store, &self.path)?;

        let removed = match self.keep {
            Some(keep) => project.keep_recent_history(keep),
            None => project.clear_history(),
        };
        if removed == 0 {
            println!("Nothing to remove for {}", project.path);
            return Ok(());
        }

        store.update_project(&project);
        ctx.save(&store)?;
        println!(
            "{} Removed {removed} history entries from {} ({} remaining)",
            "✓".green(),
            project.path,
            project.history_count()
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AnalyzeCommand {}

impl AnalyzeCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.load_store()?;
        let analysis = store.analyze_projects();

        print_section(
            &format!("Missing directories ({}):", analysis.missing_directories.len()).red(),
            analysis.missing_directories.iter().map(String::as_str),
        );
        print_section(
            &format!("Unused projects, no history ({}):", analysis.unused.len()).yellow(),
            analysis.unused.iter().map(String::as_str),
        );
        let large: Vec<String> = analysis
            .large_history
            .iter()
            .map(|(path, count)| format!("{path} ({count} entries)"))
            .collect();
        print_section(
            &format!("Large history ({}):", large.len()).blue(),
            large.iter().map(String::as_str),
        );
        print_section(
            &format!("Trust not accepted ({}):", analysis.untrusted.len()).magenta(),
            analysis.untrusted.iter().map(String::as_str),
        );

        if analysis.is_healthy() {
            println!("{}", "No issues found. All projects look healthy.".green());
        }

        println!("{}", "Summary:".bold());
        println!("  Total projects: {}", analysis.total_projects);
        println!("  Total history entries: {}", analysis.total_history_entries);
        println!(
            "  Estimated total size: {}",
            format_size(analysis.total_size_estimate as u64)
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct StatsCommand {}

impl StatsCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.load_store()?;
        let stats = store.get_stats();

        println!("{}", "Configuration statistics".bold());
        println!("  File: {}", store.config_path().display());
        println!("  Size: {}", format_size(stats.config_size));
        println!("  Projects: {}", stats.total_projects);
        println!("  History entries: {}", stats.total_history_entries);
        println!("  MCP servers: {}", stats.total_mcp_servers);
        println!("  Startups: {}", stats.num_startups);
        println!("  First start: {}", stats.first_start_time);
        println!("  Account: {}", stats.user_email);
        println!("  Organization: {}", stats.organization);
        Ok(())
    }
}

pub(crate) fn find_project(store: &ConfigStore, path: &str) -> Result<Project> {
    store.get_project(path).ok_or_else(|| anyhow!("Project not found: {path}"))
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_section<'a>(title: &colored::ColoredString, items: impl ExactSizeIterator<Item = &'a str>) {
    let total = items.len();
    if total == 0 {
        return;
    }
    println!("{title}");
    for item in items.take(REPORT_LIMIT) {
        println!("  • {item}");
    }
    if total > REPORT_LIMIT {
        println!("  ... and {} more", total - REPORT_LIMIT);
    }
    println!();
}
