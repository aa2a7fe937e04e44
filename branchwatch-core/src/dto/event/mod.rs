//! Workflow event payload DTOs
//!
//! GitHub writes the triggering event as JSON to the file named by
//! `GITHUB_EVENT_PATH`.

use serde::{Deserialize, Serialize};

/// The subset of an event payload the tool reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    /// Present only for pull-request triggered events
    #[serde(default)]
    pub pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPullRequest {
    pub number: u64,
}
