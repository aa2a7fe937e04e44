//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod check;
mod overrides;

pub use check::CheckArgs;
pub use overrides::OverridesArgs;

use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile the PR status report with the latest main-branch run
    Check(CheckArgs),
    /// Scan text for override directives
    Overrides(OverridesArgs),
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `api_url` - Base URL of the GitHub API
///
/// # Returns
/// The process exit code, failure when the checked workflow fails the job
pub async fn handle_command(command: Commands, api_url: &str) -> Result<ExitCode> {
    match command {
        Commands::Check(args) => check::handle_check_command(args, api_url).await,
        Commands::Overrides(args) => overrides::handle_overrides_command(args).await,
    }
}
