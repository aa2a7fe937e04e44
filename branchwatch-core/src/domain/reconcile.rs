//! Merges one newly observed workflow outcome into a report

use tracing::info;

use super::observation::{Conclusion, PipelineObservation};
use super::report::{EntryLevel, PipelineEntry, Report};

/// Applies `observation` to `report`
///
/// A failure is upserted (in place when the workflow is already listed),
/// labelled `warning` when overridden. A success removes the workflow's
/// entry. Nothing else in the report changes.
pub fn reconcile(report: Report, observation: &PipelineObservation, overridden: bool) -> Report {
    let listed = report.entry(&observation.name).is_some();

    match observation.conclusion {
        Conclusion::Failure => {
            if listed {
                info!("Updating workflow {} in report", observation.name);
            } else {
                info!("Adding workflow {} to report", observation.name);
            }
            report.with_entry_upserted(PipelineEntry {
                name: observation.name.clone(),
                url: observation.url.clone(),
                level: EntryLevel::for_override(overridden),
            })
        }
        Conclusion::Success if listed => {
            info!("Removing successful workflow {} from report", observation.name);
            report.with_entry_removed(&observation.name)
        }
        Conclusion::Success => report,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::context::ReportContext;
    use std::collections::HashSet;

    fn failing(name: &str, run: u32) -> PipelineObservation {
        PipelineObservation::new(name, format!("https://ci/{}/{}", name, run), Conclusion::Failure)
    }

    fn passing(name: &str) -> PipelineObservation {
        PipelineObservation::new(name, format!("https://ci/{}/ok", name), Conclusion::Success)
    }

    fn fresh() -> Report {
        Report::fresh(&ReportContext::new("main"))
    }

    #[test]
    fn test_override_only_changes_label() {
        let warned = reconcile(fresh(), &failing("build", 1), true);
        assert_eq!(warned.entry("build").unwrap().level, EntryLevel::Warning);

        let failed = reconcile(fresh(), &failing("build", 1), false);
        assert_eq!(failed.entry("build").unwrap().level, EntryLevel::Failure);

        let recovered = reconcile(warned, &passing("build"), true);
        assert!(recovered.entry("build").is_none());
        assert!(recovered.entries.is_empty());
    }

    #[test]
    fn test_failure_updates_in_place() {
        let report = reconcile(fresh(), &failing("a", 1), false);
        let report = reconcile(report, &failing("b", 1), false);
        let report = reconcile(report, &failing("a", 2), true);

        assert_eq!(report.entries[0].name, "a");
        assert_eq!(report.entries[0].url, "https://ci/a/2");
        assert_eq!(report.entries[0].level, EntryLevel::Warning);
        assert_eq!(report.entries[1].name, "b");
    }

    #[test]
    fn test_success_on_unlisted_is_noop() {
        let before = reconcile(fresh(), &failing("a", 1), false);
        let after = reconcile(before.clone(), &passing("b"), false);
        assert_eq!(before, after);
    }

    #[test]
    fn test_preamble_untouched() {
        let mut report = fresh();
        report.preamble.push("a note from a human".to_string());
        let preamble = report.preamble.clone();

        let report = reconcile(report, &failing("a", 1), false);
        let report = reconcile(report, &passing("a"), false);
        assert_eq!(report.preamble, preamble);
    }

    #[test]
    fn test_at_most_one_entry_per_name() {
        let names = ["a", "b", "c"];
        let mut report = fresh();
        for step in 0..60u32 {
            let name = names[(step * 7 % 3) as usize];
            let observation = match step % 5 {
                0 | 3 => passing(name),
                _ => failing(name, step),
            };
            report = reconcile(report, &observation, step % 2 == 0);

            let unique: HashSet<_> = report.entries.iter().map(|e| &e.name).collect();
            assert_eq!(unique.len(), report.entries.len());
        }
    }
}
