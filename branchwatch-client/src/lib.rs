//! Branchwatch GitHub Client
//!
//! A small, type-safe HTTP client for the parts of the GitHub REST API that
//! Branchwatch needs: issue comments (the status report), pull requests (the
//! override directives) and workflow runs (the main-branch observations).
//!
//! # Example
//!
//! ```no_run
//! use branchwatch_client::{GitHubClient, RepoSlug};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GitHubClient::new("https://api.github.com", "ghp_token");
//!     let repo: RepoSlug = "octo/widgets".parse()?;
//!
//!     let comments = client.list_issue_comments(&repo, 42).await?;
//!     println!("PR has {} comments", comments.len());
//!     Ok(())
//! }
//! ```

mod comments;
pub mod error;
mod pulls;
mod repository;
mod runs;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use repository::RepoSlug;

use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;

/// Default base URL of the public GitHub API
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const API_VERSION: &str = "2022-11-28";
const MEDIA_TYPE: &str = "application/vnd.github+json";
const AGENT: &str = concat!("branchwatch/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the GitHub REST API
///
/// Methods are organized into logical groups:
/// - Issue comments (list, get, create, update, delete)
/// - Pull requests (get)
/// - Workflow runs (list)
#[derive(Clone)]
pub struct GitHubClient {
    /// Base URL of the API (e.g., "https://api.github.com")
    api_url: String,
    /// Token sent as a bearer credential
    token: String,
    /// HTTP client instance
    client: Client,
}

impl fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl GitHubClient {
    /// Create a new GitHub client
    ///
    /// # Arguments
    /// * `api_url` - The base URL of the API (e.g., "https://api.github.com")
    /// * `token` - A token allowed to read runs and write PR comments
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self::with_client(api_url, token, Client::new())
    }

    /// Create a new GitHub client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use branchwatch_client::GitHubClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = GitHubClient::with_client("https://api.github.com", "token", http_client);
    /// ```
    pub fn with_client(
        api_url: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        let api_url = api_url.into();
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Start an authenticated request against `path` (which begins with `/`)
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.api_url, path))
            .bearer_auth(&self.token)
            .header(ACCEPT, MEDIA_TYPE)
            .header(USER_AGENT, AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await.map(|_| ())
    }

    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url));
        }
        Err(ClientError::api_error(status.as_u16(), error_text))
    }
}
