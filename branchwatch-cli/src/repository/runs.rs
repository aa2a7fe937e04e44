//! Workflow runs repository
//!
//! Source of the main-branch observation: the newest completed run of the
//! tracked workflow.

use anyhow::{Context, Result};
use async_trait::async_trait;
use branchwatch_client::{GitHubClient, RepoSlug};
use branchwatch_core::dto::run::WorkflowRun;
use tracing::debug;

/// Run status filter for finished runs
const COMPLETED: &str = "completed";

/// Repository trait for workflow run history
#[async_trait]
pub trait RunRepository: Send + Sync {
    /// Fetches the most recently created completed run on `branch`
    ///
    /// # Arguments
    /// * `workflow_id` - Workflow file name or numeric ID
    /// * `branch` - Branch to look at
    async fn latest_completed_run(
        &self,
        workflow_id: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>>;
}

/// GitHub implementation of RunRepository
pub struct GitHubRunRepository {
    client: GitHubClient,
    repo: RepoSlug,
}

impl GitHubRunRepository {
    pub fn new(client: GitHubClient, repo: RepoSlug) -> Self {
        Self { client, repo }
    }
}

#[async_trait]
impl RunRepository for GitHubRunRepository {
    async fn latest_completed_run(
        &self,
        workflow_id: &str,
        branch: &str,
    ) -> Result<Option<WorkflowRun>> {
        let runs = self
            .client
            .list_workflow_runs(&self.repo, workflow_id, branch, COMPLETED)
            .await
            .with_context(|| format!("Failed to list runs of workflow {}", workflow_id))?;

        debug!(
            "Workflow {} has {} completed run(s) on {}",
            workflow_id, runs.total_count, branch
        );
        Ok(runs.latest())
    }
}
