//! Check command handler
//!
//! Reconciles the PR status report with the latest main-branch run of the
//! tracked workflow and reports whether the job should fail.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use branchwatch_client::{GitHubClient, RepoSlug};
use branchwatch_core::domain::{Outcome, ReportContext, WriteAction};
use clap::{ArgAction, Args};
use clap::builder::BoolishValueParser;
use colored::*;
use tracing::info;

use crate::annotations;
use crate::config::{self, Config};
use crate::repository::{GitHubPullRequestRepository, GitHubReportRepository, GitHubRunRepository};
use crate::service::{CheckReport, CheckService, CheckSettings, DEFAULT_MAX_ATTEMPTS};
use crate::types::WorkflowRef;

/// Arguments of the check command
///
/// Every option can be supplied through the environment the Actions runner
/// provides, so the command runs without flags inside a workflow step.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Token used for the GitHub API
    #[arg(long, env = "INPUT_GH_TOKEN", hide_env_values = true)]
    token: String,

    /// Tracked workflow reference (owner/repo/.github/workflows/file@ref)
    #[arg(long, env = "INPUT_WORKFLOW_REF")]
    workflow_ref: String,

    /// Branch whose runs are tracked
    #[arg(long, env = "INPUT_MAIN_BRANCH", default_value = "main")]
    main_branch: String,

    /// Honor [ci override_main_branch_checks] without a workflow name
    #[arg(
        long,
        env = "INPUT_ALLOW_OVERRIDE_ALL",
        default_value = "false",
        action = ArgAction::Set,
        value_parser = BoolishValueParser::new()
    )]
    allow_override_all: bool,

    /// Repository in owner/name form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Workflow name used as the report key
    #[arg(long, env = "GITHUB_WORKFLOW")]
    workflow_name: String,

    /// Pull request number (read from the event payload when omitted)
    #[arg(long)]
    pull_number: Option<u64>,

    /// Path of the event payload written by the Actions runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Compute the report change without writing it
    #[arg(long)]
    dry_run: bool,
}

impl CheckArgs {
    /// Builds the run configuration
    fn into_config(self, api_url: &str) -> Result<Config> {
        let pull_number = match (self.pull_number, &self.event_path) {
            (Some(number), _) => number,
            (None, Some(path)) => config::read_pull_number(path)?,
            (None, None) => anyhow::bail!("This action must be triggered by a pull request"),
        };

        let config = Config {
            api_url: api_url.to_string(),
            token: self.token,
            repository: self.repository.parse::<RepoSlug>()?,
            pull_number,
            workflow_name: self.workflow_name,
            workflow_ref: WorkflowRef::parse(&self.workflow_ref)?,
            main_branch: self.main_branch,
            allow_override_all: self.allow_override_all,
            dry_run: self.dry_run,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Handle the check command
pub async fn handle_check_command(args: CheckArgs, api_url: &str) -> Result<ExitCode> {
    let config = args.into_config(api_url).context("Invalid configuration")?;
    info!(
        "owner: {}, repo: {}, pr: {}",
        config.repository.owner, config.repository.name, config.pull_number
    );

    let client = GitHubClient::new(&config.api_url, &config.token);
    let service = CheckService::new(
        Arc::new(GitHubReportRepository::new(
            client.clone(),
            config.repository.clone(),
            config.pull_number,
        )),
        Arc::new(GitHubPullRequestRepository::new(
            client.clone(),
            config.repository.clone(),
            config.pull_number,
        )),
        Arc::new(GitHubRunRepository::new(client, config.repository.clone())),
        CheckSettings {
            context: ReportContext::new(&config.main_branch),
            workflow_name: config.workflow_name.clone(),
            workflow_id: config.workflow_ref.workflow_id().to_string(),
            allow_override_all: config.allow_override_all,
            dry_run: config.dry_run,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        },
    );

    let report = service.run().await?;
    print_report(&report, config.dry_run);

    Ok(surface_outcome(&report.outcome))
}

/// Prints what happened to the status report
fn print_report(report: &CheckReport, dry_run: bool) {
    for diagnostic in &report.diagnostics {
        annotations::warning(&diagnostic.to_string());
    }

    let Some(action) = &report.action else {
        return;
    };
    if report.overridden {
        println!("{}", "Workflow is overridden on this pull request".cyan());
    }

    let verb = match action {
        WriteAction::NoOp => "left absent",
        WriteAction::Create { .. } => "created",
        WriteAction::Update { .. } => "updated",
        WriteAction::Delete { .. } => "deleted",
    };
    let prefix = if dry_run { "[dry run] " } else { "" };
    println!("{}Status report {}", prefix.dimmed(), verb.bold());

    if dry_run {
        if let WriteAction::Create { body } | WriteAction::Update { body, .. } = action {
            println!("{}", body.dimmed());
        }
    }
}

/// Turns the outcome into annotations and an exit code
fn surface_outcome(outcome: &Outcome) -> ExitCode {
    match outcome {
        Outcome::Pass { note: None } => {
            println!("{}", "✓ Latest main-branch run is healthy".green().bold());
            ExitCode::SUCCESS
        }
        Outcome::Pass { note: Some(note) } => {
            annotations::notice(note);
            println!("{}", "✓ Failure overridden, not failing the run".yellow().bold());
            ExitCode::SUCCESS
        }
        Outcome::Fail(reason) => {
            annotations::error(&reason.to_string());
            println!("{}", format!("✗ {}", reason).red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(extra: &[&str]) -> CheckArgs {
        let mut argv = vec![
            "branchwatch",
            "--token",
            "t",
            "--workflow-ref",
            "octo/widgets/.github/workflows/ci.yml@refs/heads/main",
            "--repository",
            "octo/widgets",
            "--workflow-name",
            "CI",
        ];
        argv.extend_from_slice(extra);
        Harness::try_parse_from(argv).unwrap().args
    }

    #[test]
    fn test_args_into_config() {
        let config = parse(&["--pull-number", "5", "--allow-override-all", "yes"])
            .into_config("https://api.github.com")
            .unwrap();

        assert_eq!(config.pull_number, 5);
        assert_eq!(config.main_branch, "main");
        assert!(config.allow_override_all);
        assert_eq!(config.workflow_ref.workflow_id(), "ci.yml");
        assert_eq!(config.repository, RepoSlug::new("octo", "widgets"));
    }

    #[test]
    fn test_allow_override_all_accepts_false_string() {
        let args = parse(&["--pull-number", "5", "--allow-override-all", "false"]);
        assert!(!args.allow_override_all);
    }

    #[test]
    fn test_missing_pull_request_is_rejected() {
        let mut args = parse(&[]);
        args.event_path = None;
        let err = args.into_config("https://api.github.com").unwrap_err();
        assert!(err.to_string().contains("pull request"));
    }
}
