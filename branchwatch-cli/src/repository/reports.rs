//! Reports repository
//!
//! The status report is persisted as a comment on the pull request, found
//! by its marker.

use anyhow::{Context, Result};
use async_trait::async_trait;
use branchwatch_client::{GitHubClient, RepoSlug};
use branchwatch_core::domain::report::{PersistedReport, ReportId};
use tracing::debug;

/// Repository trait for the persisted status report
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Finds the first comment carrying `marker`
    async fn find_report(&self, marker: &str) -> Result<Option<PersistedReport>>;

    /// Re-reads a report by ID; `None` if it was deleted
    async fn fetch_report(&self, id: ReportId) -> Result<Option<PersistedReport>>;

    /// Creates the report
    async fn create_report(&self, body: &str) -> Result<ReportId>;

    /// Replaces the report body
    async fn update_report(&self, id: ReportId, body: &str) -> Result<()>;

    /// Deletes the report
    async fn delete_report(&self, id: ReportId) -> Result<()>;
}

/// GitHub implementation of ReportRepository
pub struct GitHubReportRepository {
    client: GitHubClient,
    repo: RepoSlug,
    pull_number: u64,
}

impl GitHubReportRepository {
    /// Creates a new report repository
    ///
    /// # Arguments
    /// * `client` - GitHub API client
    /// * `repo` - Repository of the pull request
    /// * `pull_number` - Pull request whose comments hold the report
    pub fn new(client: GitHubClient, repo: RepoSlug, pull_number: u64) -> Self {
        Self {
            client,
            repo,
            pull_number,
        }
    }
}

#[async_trait]
impl ReportRepository for GitHubReportRepository {
    async fn find_report(&self, marker: &str) -> Result<Option<PersistedReport>> {
        let comments = self
            .client
            .list_issue_comments(&self.repo, self.pull_number)
            .await
            .context("Failed to list pull request comments")?;

        let report = comments
            .into_iter()
            .find(|comment| comment.has_marker(marker))
            .map(PersistedReport::from);

        match &report {
            Some(found) => debug!("Found status report in comment {}", found.id),
            None => debug!("No status report on {}#{}", self.repo, self.pull_number),
        }
        Ok(report)
    }

    async fn fetch_report(&self, id: ReportId) -> Result<Option<PersistedReport>> {
        match self.client.get_issue_comment(&self.repo, id.0).await {
            Ok(comment) => Ok(Some(comment.into())),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to fetch comment {}", id)),
        }
    }

    async fn create_report(&self, body: &str) -> Result<ReportId> {
        let comment = self
            .client
            .create_issue_comment(&self.repo, self.pull_number, body)
            .await
            .context("Failed to create status report comment")?;

        Ok(ReportId(comment.id))
    }

    async fn update_report(&self, id: ReportId, body: &str) -> Result<()> {
        self.client
            .update_issue_comment(&self.repo, id.0, body)
            .await
            .with_context(|| format!("Failed to update status report comment {}", id))?;

        Ok(())
    }

    async fn delete_report(&self, id: ReportId) -> Result<()> {
        self.client
            .delete_issue_comment(&self.repo, id.0)
            .await
            .with_context(|| format!("Failed to delete status report comment {}", id))
    }
}
