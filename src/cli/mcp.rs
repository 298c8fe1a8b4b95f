//! MCP server management commands.
//!
//! Server blocks are edited per project in the `mcpServers` mapping of
//! `~/.claude.json`. Every block is run through
//! [`McpValidator`](crate::mcp::McpValidator) before it is stored; advisory
//! notes (e.g. a missing `GITHUB_TOKEN`) are printed but do not block saving.
//!
//! # Examples
//!
//! ```bash
//! claude-manager mcp templates
//! claude-manager mcp add /home/me/app github --template github
//! claude-manager mcp add /home/me/app local --json '{"command": "node", "args": ["server.js"]}'
//! claude-manager mcp validate --file server.json
//! claude-manager mcp remove /home/me/app local
//! ```

use crate::cli::CommandContext;
use crate::cli::projects::find_project;
use crate::mcp::{McpServerConfig, McpValidationError, McpValidator, get_template, list_templates};
use anyhow::{Context, Result, anyhow};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct McpCommand {
    #[command(subcommand)]
    subcommand: McpSubcommand,
}

#[derive(Subcommand, Debug)]
enum McpSubcommand {
    /// List a project's MCP servers
    List {
        /// Project path
        project: String,
    },
    /// Add or replace a project's MCP server
    Add {
        /// Project path
        project: String,
        /// Server name
        name: String,
        #[command(flatten)]
        source: ServerSource,
    },
    /// Remove a project's MCP server
    Remove {
        /// Project path
        project: String,
        /// Server name
        name: String,
    },
    /// Validate a server configuration without saving it
    Validate {
        #[command(flatten)]
        source: JsonSource,
    },
    /// List available server templates
    Templates,
    /// Toggle `enableAllProjectMcpServers` for a project
    ToggleAll {
        /// Project path
        project: String,
    },
}

/// Where a server configuration comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct ServerSource {
    /// Read the configuration from a JSON file
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Configuration given inline as JSON
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
    /// Start from a named template
    #[arg(long, value_name = "NAME")]
    template: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct JsonSource {
    /// Read the configuration from a JSON file
    #[arg(long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Configuration given inline as JSON
    #[arg(long, value_name = "JSON")]
    json: Option<String>,
}

impl McpCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        match self.subcommand {
            McpSubcommand::List {
                project,
            } => list(ctx, &project),
            McpSubcommand::Add {
                project,
                name,
                source,
            } => add(ctx, &project, &name, source),
            McpSubcommand::Remove {
                project,
                name,
            } => remove(ctx, &project, &name),
            McpSubcommand::Validate {
                source,
            } => validate(source),
            McpSubcommand::Templates => templates(),
            McpSubcommand::ToggleAll {
                project,
            } => toggle_all(ctx, &project),
        }
    }
}

fn list(ctx: &CommandContext, project_path: &str) -> Result<()> {
    let store = ctx.load_store()?;
    let project = find_project(&store, project_path)?;

    if project.mcp_servers.is_empty() {
        println!("No MCP servers configured for {project_path}");
        return Ok(());
    }

    println!("{}", format!("MCP servers for {project_path}:").bold());
    for (name, config) in &project.mcp_servers {
        match McpServerConfig::from_value(config, name) {
            Ok(server) => println!("  {}  {}", name.bold(), server.command_line()),
            Err(e) => println!("  {}  {config} ({e})", name.bold()),
        }
    }
    println!(
        "  enableAllProjectMcpServers: {}",
        project.enable_all_project_mcp_servers
    );
    Ok(())
}

fn add(ctx: &CommandContext, project_path: &str, name: &str, source: ServerSource) -> Result<()> {
    let config = match (source.file, source.json, source.template) {
        (Some(file), _, _) => parse_json(&read_file(&file)?, name)?,
        (_, Some(json), _) => parse_json(&json, name)?,
        (_, _, Some(template)) => get_template(&template).ok_or_else(|| {
            anyhow!("Unknown template '{template}'. Available: {}", list_templates().join(", "))
        })?,
        _ => return Err(anyhow!("One of --file, --json or --template is required")),
    };
    let note = McpValidator::validate(&config, name)
        .with_context(|| format!("Invalid configuration for server '{name}'"))?;

    let mut store = ctx.load_store()?;
    let mut project = find_project(&store, project_path)?;
    let replaced = project.mcp_servers.contains_key(name);
    project.set_mcp_server(name, config);
    store.update_project(&project);
    ctx.save(&store)?;

    if let Some(note) = note {
        println!("{} {note}", "!".yellow());
    }
    let verb = if replaced { "Updated" } else { "Added" };
    println!("{} {verb} MCP server '{name}' in {project_path}", "✓".green());
    Ok(())
}

fn remove(ctx: &CommandContext, project_path: &str, name: &str) -> Result<()> {
    let mut store = ctx.load_store()?;
    let mut project = find_project(&store, project_path)?;
    if project.remove_mcp_server(name).is_none() {
        return Err(anyhow!("MCP server '{name}' not found in {project_path}"));
    }
    store.update_project(&project);
    ctx.save(&store)?;
    println!("{} Removed MCP server '{name}' from {project_path}", "✓".green());
    Ok(())
}

fn validate(source: JsonSource) -> Result<()> {
    let text = match (source.file, source.json) {
        (Some(file), _) => read_file(&file)?,
        (_, Some(json)) => json,
        _ => return Err(anyhow!("One of --file or --json is required")),
    };
    let note = McpValidator::validate_json_text(&text, "cli").context("Invalid configuration")?;
    match note {
        Some(note) => println!("{} {note}", "!".yellow()),
        None => println!("{} Configuration valid", "✓".green()),
    }
    Ok(())
}

fn templates() -> Result<()> {
    for name in list_templates() {
        let Some(template) = get_template(name) else {
            continue;
        };
        println!("{}", name.bold());
        println!("{}", serde_json::to_string_pretty(&template)?);
    }
    Ok(())
}

fn toggle_all(ctx: &CommandContext, project_path: &str) -> Result<()> {
    let mut store = ctx.load_store()?;
    let mut project = find_project(&store, project_path)?;
    let enabled = project.toggle_enable_all_mcp_servers();
    store.update_project(&project);
    ctx.save(&store)?;
    println!(
        "{} enableAllProjectMcpServers is now {} for {project_path}",
        "✓".green(),
        if enabled { "on" } else { "off" }
    );
    Ok(())
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))
}

fn parse_json(text: &str, name: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| McpValidationError::InvalidJson(e.to_string()))
        .with_context(|| format!("Invalid configuration for server '{name}'"))
}
