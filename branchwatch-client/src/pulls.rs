//! Pull request endpoints

use branchwatch_core::dto::pull::PullRequest;
use reqwest::Method;

use crate::GitHubClient;
use crate::error::Result;
use crate::repository::RepoSlug;

impl GitHubClient {
    /// Get a pull request by number
    ///
    /// # Returns
    /// The pull request, including its description
    pub async fn get_pull_request(&self, repo: &RepoSlug, number: u64) -> Result<PullRequest> {
        let path = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }
}
