//! One full reconciliation pass over a report
//!
//! Ties the components together: parse the persisted report, merge the
//! observation, render, and resolve the write. The job outcome is decided
//! alongside from the same override scan.

use super::action::WriteAction;
use super::context::ReportContext;
use super::observation::PipelineObservation;
use super::outcome::Outcome;
use super::override_flag::OverrideScan;
use super::reconcile::reconcile;
use super::report::{PersistedReport, Report};

/// Result of evaluating one observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    pub report: Report,
    pub action: WriteAction,
    pub outcome: Outcome,
    pub overridden: bool,
}

pub fn evaluate(
    ctx: &ReportContext,
    existing: Option<&PersistedReport>,
    observation: &PipelineObservation,
    overrides: &OverrideScan,
) -> Evaluation {
    let overridden = overrides.covers(&observation.name);

    let report = reconcile(Report::parse(existing, ctx), observation, overridden);
    let action = WriteAction::resolve(&report, report.render(ctx));
    let outcome = Outcome::decide(observation, overridden, &ctx.main_branch);

    Evaluation {
        report,
        action,
        outcome,
        overridden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::observation::Conclusion;
    use crate::domain::report::{EntryLevel, ReportId};

    fn ctx() -> ReportContext {
        ReportContext::new("main")
    }

    fn persisted(body: String) -> PersistedReport {
        PersistedReport {
            id: ReportId(42),
            body,
            updated_at: None,
        }
    }

    fn no_overrides() -> OverrideScan {
        OverrideScan::default()
    }

    #[test]
    fn test_first_failure_creates_report() {
        let observation =
            PipelineObservation::new("build", "https://ci/runs/1", Conclusion::Failure);
        let evaluation = evaluate(&ctx(), None, &observation, &no_overrides());

        let WriteAction::Create { body } = &evaluation.action else {
            panic!("expected create, got {:?}", evaluation.action);
        };
        assert!(body.starts_with(&format!("{}\n\n{}\n\n", ctx().header, ctx().intro)));
        assert!(body.contains("\n- [build](https://ci/runs/1): failure\n"));
        assert!(body.ends_with(&format!("\n\n{}\n{}\n", ctx().marker, ctx().trailer)));
        assert_eq!(body.matches("- [").count(), 1);
        assert!(!evaluation.outcome.is_pass());
    }

    #[test]
    fn test_healthy_without_report_is_noop() {
        let observation = PipelineObservation::new("build", "u", Conclusion::Success);
        let evaluation = evaluate(&ctx(), None, &observation, &no_overrides());
        assert_eq!(evaluation.action, WriteAction::NoOp);
        assert_eq!(evaluation.outcome, Outcome::Pass { note: None });
    }

    #[test]
    fn test_recovery_deletes_report() {
        let failing = PipelineObservation::new("build", "u1", Conclusion::Failure);
        let WriteAction::Create { body } = evaluate(&ctx(), None, &failing, &no_overrides()).action
        else {
            panic!("expected create");
        };

        let passing = PipelineObservation::new("build", "u2", Conclusion::Success);
        let evaluation = evaluate(&ctx(), Some(&persisted(body)), &passing, &no_overrides());
        assert_eq!(evaluation.action, WriteAction::Delete { id: ReportId(42) });
        assert!(evaluation.report.entry("build").is_none());
    }

    #[test]
    fn test_second_pipeline_updates_report() {
        let existing = format!(
            "{}\n\n{}\n\nPlease rerun flaky jobs before merging.\n- [build](u1): failure\n\n{}\n{}\n",
            ctx().header,
            ctx().intro,
            ctx().marker,
            ctx().trailer
        );
        let lint = PipelineObservation::new("lint", "u2", Conclusion::Failure);
        let evaluation = evaluate(&ctx(), Some(&persisted(existing)), &lint, &no_overrides());

        let WriteAction::Update { id, body } = &evaluation.action else {
            panic!("expected update, got {:?}", evaluation.action);
        };
        assert_eq!(*id, ReportId(42));
        assert!(body.contains(&format!(
            "{}\n\n{}\n\nPlease rerun flaky jobs before merging.\n- [build](u1): failure\n- [lint](u2): failure\n\n",
            ctx().header,
            ctx().intro
        )));
    }

    #[test]
    fn test_override_passes_job_but_keeps_warning() {
        let overrides =
            OverrideScan::parse(Some("[ci override_main_branch_checks build]"), false);
        let observation =
            PipelineObservation::new("build", "https://ci/runs/5", Conclusion::Failure);
        let evaluation = evaluate(&ctx(), None, &observation, &overrides);

        assert!(evaluation.overridden);
        assert!(matches!(evaluation.outcome, Outcome::Pass { note: Some(_) }));
        assert_eq!(
            evaluation.report.entry("build").map(|e| e.level),
            Some(EntryLevel::Warning)
        );
        let WriteAction::Create { body } = &evaluation.action else {
            panic!("expected create");
        };
        assert!(body.contains("- [build](https://ci/runs/5): warning"));
    }

    #[test]
    fn test_rerender_of_unchanged_report_is_stable() {
        let observation = PipelineObservation::new("build", "u1", Conclusion::Failure);
        let WriteAction::Create { body } =
            evaluate(&ctx(), None, &observation, &no_overrides()).action
        else {
            panic!("expected create");
        };

        let again = evaluate(&ctx(), Some(&persisted(body.clone())), &observation, &no_overrides());
        assert_eq!(
            again.action,
            WriteAction::Update {
                id: ReportId(42),
                body
            }
        );
    }
}
