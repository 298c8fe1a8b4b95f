//! Agent listing command.

use crate::cli::CommandContext;
use crate::models::AgentType;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

const DESCRIPTION_WIDTH: usize = 80;

#[derive(Args, Debug)]
pub struct AgentsCommand {
    /// Also include agents from this project's `.claude/agents`
    #[arg(short, long, value_name = "PATH")]
    project: Option<PathBuf>,
}

impl AgentsCommand {
    pub fn execute(self, ctx: &CommandContext) -> Result<()> {
        let store = ctx.store();
        let agents = store.get_agents(self.project.as_deref());

        if agents.is_empty() {
            println!("No agents found.");
            return Ok(());
        }

        println!("{}", format!("Agents ({}):", agents.len()).bold());
        for agent in agents.values() {
            let kind = match agent.agent_type {
                AgentType::Global => "global".cyan(),
                AgentType::Project => "project".magenta(),
            };
            println!("  {} [{kind}]{}", agent.name.bold(), if agent.is_advanced() { " *" } else { "" });
            println!("      tools: {}", agent.tools_display());
            if let Some(priority) = &agent.priority {
                println!("      priority: {priority}");
            }
            if !agent.description.is_empty() {
                println!("      {}", truncate(&agent.description, DESCRIPTION_WIDTH));
            }
        }
        Ok(())
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}
