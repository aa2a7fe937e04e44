//! Configuration module
//!
//! Settings for a `check` run, gathered from GitHub Actions inputs and the
//! runner environment, plus validation.

use std::path::Path;

use anyhow::{Context, Result};
use branchwatch_client::RepoSlug;
use branchwatch_core::dto::event::EventPayload;

use crate::types::WorkflowRef;

/// Configuration of a `check` run
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the GitHub API
    pub api_url: String,

    /// Token used for all API calls
    pub token: String,

    /// Repository the pull request belongs to
    pub repository: RepoSlug,

    /// Number of the pull request carrying the report
    pub pull_number: u64,

    /// Display name of the tracked workflow, used as its report key
    pub workflow_name: String,

    /// Reference to the tracked workflow file
    pub workflow_ref: WorkflowRef,

    /// Branch whose runs are tracked
    pub main_branch: String,

    /// Whether `[ci override_main_branch_checks]` without a scope is honored
    pub allow_override_all: bool,

    /// Compute the report change without writing it
    pub dry_run: bool,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.token.is_empty() {
            anyhow::bail!("token cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.main_branch.trim().is_empty() {
            anyhow::bail!("main_branch cannot be empty");
        }

        if self.workflow_name.is_empty() {
            anyhow::bail!("workflow_name cannot be empty");
        }

        if self.pull_number == 0 {
            anyhow::bail!("pull request number must be greater than 0");
        }

        Ok(())
    }
}

/// Reads the pull request number from the event payload file
///
/// Fails when the triggering event is not a pull request event.
pub fn read_pull_number(event_path: &Path) -> Result<u64> {
    let raw = std::fs::read_to_string(event_path)
        .with_context(|| format!("Failed to read event payload: {}", event_path.display()))?;
    pull_number_from_payload(&raw)
}

fn pull_number_from_payload(raw: &str) -> Result<u64> {
    let payload: EventPayload =
        serde_json::from_str(raw).context("Failed to parse event payload JSON")?;

    payload
        .pull_request
        .map(|pr| pr.number)
        .ok_or_else(|| anyhow::anyhow!("This action must be triggered by a pull request"))
}
