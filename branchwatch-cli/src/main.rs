//! Branchwatch CLI
//!
//! Keeps a status comment on a pull request listing the workflows that are
//! failing on the main branch, and fails the job unless the PR overrides them.

mod annotations;
mod commands;
mod config;
mod repository;
mod service;
mod types;

use std::process::ExitCode;

use branchwatch_client::DEFAULT_API_URL;
use clap::Parser;
use commands::{Commands, handle_command};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "branchwatch")]
#[command(about = "Main-branch workflow status tracker for pull requests", long_about = None)]
struct Cli {
    /// GitHub API URL
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "branchwatch=info,branchwatch_core=info,branchwatch_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    info!("Running branchwatch");

    match handle_command(cli.command, &cli.api_url).await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            annotations::error(&format!("Action failed with error: {:#}", e));
            ExitCode::FAILURE
        }
    }
}
