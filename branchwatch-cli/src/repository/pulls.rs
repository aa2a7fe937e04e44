//! Pull request repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use branchwatch_client::{GitHubClient, RepoSlug};

/// Repository trait for the pull request text scanned for overrides
#[async_trait]
pub trait PullRequestRepository: Send + Sync {
    /// Fetches the pull request description; `None` when it is empty
    async fn description(&self) -> Result<Option<String>>;
}

/// GitHub implementation of PullRequestRepository
pub struct GitHubPullRequestRepository {
    client: GitHubClient,
    repo: RepoSlug,
    pull_number: u64,
}

impl GitHubPullRequestRepository {
    pub fn new(client: GitHubClient, repo: RepoSlug, pull_number: u64) -> Self {
        Self {
            client,
            repo,
            pull_number,
        }
    }
}

#[async_trait]
impl PullRequestRepository for GitHubPullRequestRepository {
    async fn description(&self) -> Result<Option<String>> {
        let pull = self
            .client
            .get_pull_request(&self.repo, self.pull_number)
            .await
            .with_context(|| {
                format!("Failed to fetch pull request {}#{}", self.repo, self.pull_number)
            })?;

        Ok(pull.body)
    }
}
