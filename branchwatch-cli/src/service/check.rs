//! Check service
//!
//! Runs one full check: observe the tracked workflow on the main branch,
//! scan the PR description for overrides, reconcile the status report and
//! write it back, and decide whether the job passes.
//!
//! GitHub has no conditional comment writes, so concurrent checks on the same
//! PR could overwrite each other. Before writing, the report is re-read and
//! compared with the snapshot the change was computed from; on mismatch the
//! whole cycle is retried. This narrows the race window but does not close it.

use std::sync::Arc;

use anyhow::Result;
use branchwatch_core::domain::{
    OverrideDiagnostic, OverrideScan, Outcome, PersistedReport, ReportContext, WriteAction,
    evaluate,
};
use tracing::{info, warn};

use crate::repository::{PullRequestRepository, ReportRepository, RunRepository};

/// Attempts made before giving up on a report that keeps changing
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Per-run settings of the check service
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub context: ReportContext,
    /// Report key of the tracked workflow
    pub workflow_name: String,
    /// Identifier used to query run history
    pub workflow_id: String,
    pub allow_override_all: bool,
    pub dry_run: bool,
    pub max_attempts: u32,
}

/// What a check did and decided
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub outcome: Outcome,
    /// `None` when there was nothing to reconcile
    pub action: Option<WriteAction>,
    pub overridden: bool,
    pub diagnostics: Vec<OverrideDiagnostic>,
}

/// Whether a write went through or hit a concurrent change
enum WriteResult {
    Applied,
    Conflict,
}

/// Drives a check through the repositories
pub struct CheckService {
    reports: Arc<dyn ReportRepository>,
    pulls: Arc<dyn PullRequestRepository>,
    runs: Arc<dyn RunRepository>,
    settings: CheckSettings,
}

impl CheckService {
    pub fn new(
        reports: Arc<dyn ReportRepository>,
        pulls: Arc<dyn PullRequestRepository>,
        runs: Arc<dyn RunRepository>,
        settings: CheckSettings,
    ) -> Self {
        Self {
            reports,
            pulls,
            runs,
            settings,
        }
    }

    /// Runs the check
    ///
    /// A workflow without any completed run on the main branch fails the check
    /// and leaves the report untouched.
    pub async fn run(&self) -> Result<CheckReport> {
        let settings = &self.settings;
        let branch = &settings.context.main_branch;

        info!(
            "Gathering completed runs of {} on {}",
            settings.workflow_id, branch
        );
        let Some(run) = self
            .runs
            .latest_completed_run(&settings.workflow_id, branch)
            .await?
        else {
            warn!("No completed runs of {} on {}", settings.workflow_id, branch);
            return Ok(CheckReport {
                outcome: Outcome::no_runs_found(&settings.workflow_id, branch),
                action: None,
                overridden: false,
                diagnostics: Vec::new(),
            });
        };
        let observation = run.observe(&settings.workflow_name);
        info!(
            "Latest run of {} is {:?}: {}",
            observation.name, observation.conclusion, observation.url
        );

        info!("Gathering PR description");
        let description = self.pulls.description().await?;
        let overrides = OverrideScan::parse(description.as_deref(), settings.allow_override_all);

        for attempt in 1..=settings.max_attempts {
            let existing = self.reports.find_report(&settings.context.marker).await?;
            let evaluation =
                evaluate(&settings.context, existing.as_ref(), &observation, &overrides);

            if settings.dry_run {
                info!("Dry run, not applying {} action", evaluation.action.name());
            } else if let WriteResult::Conflict =
                self.apply(&evaluation.action, existing.as_ref()).await?
            {
                warn!(
                    "Status report changed concurrently (attempt {}/{}), reconciling again",
                    attempt, settings.max_attempts
                );
                continue;
            }

            return Ok(CheckReport {
                outcome: evaluation.outcome,
                action: Some(evaluation.action),
                overridden: evaluation.overridden,
                diagnostics: overrides.diagnostics,
            });
        }

        anyhow::bail!(
            "Status report kept changing concurrently, gave up after {} attempts",
            settings.max_attempts
        )
    }

    /// Writes `action` if the persisted report still matches `snapshot`
    async fn apply(
        &self,
        action: &WriteAction,
        snapshot: Option<&PersistedReport>,
    ) -> Result<WriteResult> {
        match action {
            WriteAction::NoOp => {
                info!("No existing report and workflow is healthy, nothing to do");
            }
            WriteAction::Create { body } => {
                if self
                    .reports
                    .find_report(&self.settings.context.marker)
                    .await?
                    .is_some()
                {
                    return Ok(WriteResult::Conflict);
                }
                info!("Creating status report");
                let id = self.reports.create_report(body).await?;
                info!("Created status report {}", id);
            }
            WriteAction::Update { id, body } => {
                if !self.unchanged(snapshot).await? {
                    return Ok(WriteResult::Conflict);
                }
                info!("Updating status report {} with modified workflow list", id);
                self.reports.update_report(*id, body).await?;
            }
            WriteAction::Delete { id } => {
                if !self.unchanged(snapshot).await? {
                    return Ok(WriteResult::Conflict);
                }
                info!("Removing status report {}, no workflows failing", id);
                self.reports.delete_report(*id).await?;
            }
        }

        Ok(WriteResult::Applied)
    }

    /// Whether the persisted report still has the snapshot's revision
    async fn unchanged(&self, snapshot: Option<&PersistedReport>) -> Result<bool> {
        let Some(snapshot) = snapshot else {
            return Ok(false);
        };

        let current = self.reports.fetch_report(snapshot.id).await?;
        Ok(current.is_some_and(|current| {
            current.updated_at == snapshot.updated_at && current.body == snapshot.body
        }))
    }
}
