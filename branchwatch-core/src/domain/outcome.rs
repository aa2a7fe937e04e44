//! Pass/fail signal of the invoking job

use std::fmt;

use serde::{Deserialize, Serialize};

use super::observation::{Conclusion, PipelineObservation};

/// Why the job is reported as failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailReason {
    /// The latest main-branch run failed and is not overridden
    PipelineFailing { url: String, branch: String },
    /// The workflow has no completed run on the main branch
    NoRunsFound { workflow: String, branch: String },
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailReason::PipelineFailing { url, branch } => write!(
                f,
                "Latest run of workflow on {} branch is failing: {}",
                branch, url
            ),
            FailReason::NoRunsFound { workflow, branch } => write!(
                f,
                "No completed runs of workflow {} found on {} branch",
                workflow, branch
            ),
        }
    }
}

/// Final signal surfaced by the job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Job passes; `note` explains an overridden failure
    Pass { note: Option<String> },
    Fail(FailReason),
}

impl Outcome {
    /// Decides the job outcome from the observed conclusion and override
    ///
    /// Independent of the report: an overridden failure passes here while
    /// still being listed as a warning in the report.
    pub fn decide(observation: &PipelineObservation, overridden: bool, main_branch: &str) -> Self {
        if observation.conclusion == Conclusion::Success {
            return Outcome::Pass { note: None };
        }

        let reason = FailReason::PipelineFailing {
            url: observation.url.clone(),
            branch: main_branch.to_string(),
        };
        if overridden {
            Outcome::Pass {
                note: Some(format!("{}. Override flag found, not failing the run.", reason)),
            }
        } else {
            Outcome::Fail(reason)
        }
    }

    pub fn no_runs_found(workflow: impl Into<String>, main_branch: impl Into<String>) -> Self {
        Outcome::Fail(FailReason::NoRunsFound {
            workflow: workflow.into(),
            branch: main_branch.into(),
        })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass { .. })
    }
}
