//! Pull request DTOs

use serde::{Deserialize, Serialize};

/// A pull request, reduced to what override scanning needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    /// The PR description; `null` when the author left it empty
    #[serde(default)]
    pub body: Option<String>,
}
