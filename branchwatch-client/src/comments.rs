//! Issue comment endpoints

use branchwatch_core::dto::comment::{CommentBody, IssueComment};
use reqwest::Method;
use tracing::debug;

use crate::GitHubClient;
use crate::error::Result;
use crate::repository::RepoSlug;

/// Page size used when listing comments (the API maximum)
const PER_PAGE: usize = 100;

impl GitHubClient {
    // =============================================================================
    // Issue Comments
    // =============================================================================

    /// List every comment on an issue or pull request
    ///
    /// Follows pagination until a short page is returned.
    ///
    /// # Arguments
    /// * `repo` - The repository
    /// * `number` - The issue or pull request number
    pub async fn list_issue_comments(
        &self,
        repo: &RepoSlug,
        number: u64,
    ) -> Result<Vec<IssueComment>> {
        let path = format!("/repos/{}/{}/issues/{}/comments", repo.owner, repo.name, number);
        let mut comments = Vec::new();

        for page in 1.. {
            let response = self
                .request(Method::GET, &path)
                .query(&[("per_page", PER_PAGE), ("page", page)])
                .send()
                .await?;
            let batch: Vec<IssueComment> = self.handle_response(response).await?;
            let last_page = batch.len() < PER_PAGE;
            comments.extend(batch);

            if last_page {
                break;
            }
        }

        debug!("Fetched {} comments for {}#{}", comments.len(), repo, number);
        Ok(comments)
    }

    /// Get a single comment by ID
    pub async fn get_issue_comment(
        &self,
        repo: &RepoSlug,
        comment_id: u64,
    ) -> Result<IssueComment> {
        let path = format!("/repos/{}/{}/issues/comments/{}", repo.owner, repo.name, comment_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Create a comment on an issue or pull request
    ///
    /// # Returns
    /// The created comment
    pub async fn create_issue_comment(
        &self,
        repo: &RepoSlug,
        number: u64,
        body: impl Into<String>,
    ) -> Result<IssueComment> {
        let path = format!("/repos/{}/{}/issues/{}/comments", repo.owner, repo.name, number);
        let response = self
            .request(Method::POST, &path)
            .json(&CommentBody { body: body.into() })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Replace the body of a comment
    ///
    /// # Returns
    /// The updated comment
    pub async fn update_issue_comment(
        &self,
        repo: &RepoSlug,
        comment_id: u64,
        body: impl Into<String>,
    ) -> Result<IssueComment> {
        let path = format!("/repos/{}/{}/issues/comments/{}", repo.owner, repo.name, comment_id);
        let response = self
            .request(Method::PATCH, &path)
            .json(&CommentBody { body: body.into() })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Delete a comment
    pub async fn delete_issue_comment(&self, repo: &RepoSlug, comment_id: u64) -> Result<()> {
        let path = format!("/repos/{}/{}/issues/comments/{}", repo.owner, repo.name, comment_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }
}
