//! Workflow run endpoints

use branchwatch_core::dto::run::WorkflowRunList;
use reqwest::Method;

use crate::GitHubClient;
use crate::error::Result;
use crate::repository::RepoSlug;

impl GitHubClient {
    /// List runs of a workflow
    ///
    /// # Arguments
    /// * `repo` - The repository
    /// * `workflow_id` - Workflow file name (e.g., "ci.yml") or numeric ID
    /// * `branch` - Only runs triggered on this branch
    /// * `status` - Run status filter (e.g., "completed")
    ///
    /// # Returns
    /// The first page of matching runs, newest first
    pub async fn list_workflow_runs(
        &self,
        repo: &RepoSlug,
        workflow_id: &str,
        branch: &str,
        status: &str,
    ) -> Result<WorkflowRunList> {
        let path = format!(
            "/repos/{}/{}/actions/workflows/{}/runs",
            repo.owner, repo.name, workflow_id
        );
        let response = self
            .request(Method::GET, &path)
            .query(&[("branch", branch), ("status", status)])
            .send()
            .await?;

        self.handle_response(response).await
    }
}
