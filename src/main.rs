//! claude-manager CLI entry point
//!
//! Parses arguments, installs the log subscriber and runs the selected
//! command. Any error is shown with suggestions and exits with status 1.

use anyhow::Result;
use clap::Parser;
use claude_manager::cli::Cli;
use claude_manager::core::user_friendly_error;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "warn";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Verbosity flags win over RUST_LOG
    let filter = match cli.log_level() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL)),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute() {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
