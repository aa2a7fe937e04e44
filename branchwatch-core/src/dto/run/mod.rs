//! Workflow run DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::observation::{Conclusion, PipelineObservation};

/// One run of a workflow
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub html_url: String,
    /// `null` while the run is in progress
    #[serde(default)]
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl WorkflowRun {
    /// Converts the run into an observation of the named workflow
    pub fn observe(&self, workflow_name: &str) -> PipelineObservation {
        PipelineObservation::new(
            workflow_name,
            self.html_url.clone(),
            Conclusion::from_github(self.conclusion.as_deref()),
        )
    }
}

/// Response of the list-workflow-runs endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowRunList {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub workflow_runs: Vec<WorkflowRun>,
}

impl WorkflowRunList {
    /// The most recently created run
    pub fn latest(self) -> Option<WorkflowRun> {
        self.workflow_runs.into_iter().max_by_key(|run| run.created_at)
    }
}
