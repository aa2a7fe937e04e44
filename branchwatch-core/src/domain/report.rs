//! Status report document
//!
//! A report is a PR comment made of free-form preamble lines (header and
//! intro when the tool created it), one line per failing workflow, then the
//! marker sentinel and a trailer. The grammar is line-based:
//!
//! ```text
//! **Workflow Status Tracker**
//!
//! The following workflows are failing on main. ...
//!
//! - [build](https://github.com/o/r/actions/runs/1): failure
//! - [lint](https://github.com/o/r/actions/runs/2): warning
//!
//! <!-- unique_identifier: action_comment_marker -->
//! This comment created by the main-branch-check action. ...
//! ```
//!
//! Any line that is not an entry line is preserved as preamble.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::ReportContext;

/// Number of leading preamble lines (header, intro) followed by a blank line
const RESERVED_LINES: usize = 2;

/// Identifier of the persisted report (the GitHub comment id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u64);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a report as currently persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedReport {
    pub id: ReportId,
    pub body: String,
    /// Revision token used to detect concurrent writers
    pub updated_at: Option<DateTime<Utc>>,
}

/// How a failing workflow is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryLevel {
    /// Failing, but overridden on this PR
    Warning,
    Failure,
}

impl EntryLevel {
    pub fn for_override(overridden: bool) -> Self {
        if overridden {
            EntryLevel::Warning
        } else {
            EntryLevel::Failure
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryLevel::Warning => "warning",
            EntryLevel::Failure => "failure",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "warning" => Some(EntryLevel::Warning),
            "failure" => Some(EntryLevel::Failure),
            _ => None,
        }
    }
}

impl fmt::Display for EntryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report line referencing one failing workflow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEntry {
    pub name: String,
    pub url: String,
    pub level: EntryLevel,
}

impl PipelineEntry {
    /// Parses a line of the form `- [<name>](<url>): <level>`
    pub fn parse_line(line: &str) -> Option<Self> {
        let rest = line.strip_prefix("- [")?;
        let (link, level) = rest.rsplit_once("): ")?;
        let level = EntryLevel::parse(level.trim_end())?;
        // Run URLs never contain `](`, names may
        let (name, url) = link.rsplit_once("](")?;
        if name.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            url: url.to_string(),
            level,
        })
    }

    pub fn to_line(&self) -> String {
        format!("- [{}]({}): {}", self.name, self.url, self.level)
    }
}

/// Structured view of a status report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub preamble: Vec<String>,
    /// Failing workflows, in the order they were first observed
    pub entries: Vec<PipelineEntry>,
    /// Set when the report was read back from a persisted comment
    pub id: Option<ReportId>,
}

impl Report {
    /// An empty report with the standard header and intro
    pub fn fresh(ctx: &ReportContext) -> Self {
        Self {
            preamble: vec![ctx.header.clone(), ctx.intro.clone()],
            entries: Vec::new(),
            id: None,
        }
    }

    /// Reconstructs a report from its persisted form, if there is one
    ///
    /// Everything after the marker is dropped (the trailer is regenerated).
    /// Blank lines collapse, and lines that are not entry lines stay in the
    /// preamble in their original order. A repeated workflow keeps its first
    /// entry.
    pub fn parse(existing: Option<&PersistedReport>, ctx: &ReportContext) -> Self {
        let Some(existing) = existing else {
            return Self::fresh(ctx);
        };

        let content = existing
            .body
            .split_once(ctx.marker.as_str())
            .map_or(existing.body.as_str(), |(before, _)| before);

        let mut preamble = Vec::new();
        let mut entries: Vec<PipelineEntry> = Vec::new();
        let mut seen = HashSet::new();

        for line in content
            .trim()
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
        {
            match PipelineEntry::parse_line(line) {
                Some(entry) if seen.insert(entry.name.clone()) => entries.push(entry),
                Some(entry) => debug!("Dropping duplicate entry for workflow {}", entry.name),
                None => preamble.push(line.to_string()),
            }
        }

        Self {
            preamble,
            entries,
            id: Some(existing.id),
        }
    }

    /// Whether a persisted report was found
    pub fn exists(&self) -> bool {
        self.id.is_some()
    }

    pub fn entry(&self, name: &str) -> Option<&PipelineEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Returns a report where `entry` replaces the entry of the same name in
    /// place, or is appended when there is none
    pub fn with_entry_upserted(self, entry: PipelineEntry) -> Self {
        let mut entries = self.entries;
        match entries.iter().position(|e| e.name == entry.name) {
            Some(index) => entries[index] = entry,
            None => entries.push(entry),
        }
        Self { entries, ..self }
    }

    /// Returns a report without the entry for `name`
    pub fn with_entry_removed(self, name: &str) -> Self {
        let entries = self
            .entries
            .into_iter()
            .filter(|e| e.name != name)
            .collect();
        Self { entries, ..self }
    }

    /// Serializes the report, reattaching the marker and trailer
    ///
    /// The first two preamble lines are each followed by a blank line.
    pub fn render(&self, ctx: &ReportContext) -> String {
        let entry_lines: Vec<String> = self.entries.iter().map(PipelineEntry::to_line).collect();

        let mut lines: Vec<&str> = Vec::with_capacity(self.preamble.len() + entry_lines.len() + 2);
        for (index, line) in self.preamble.iter().enumerate() {
            lines.push(line);
            if index < RESERVED_LINES {
                lines.push("");
            }
        }
        lines.extend(entry_lines.iter().map(String::as_str));

        format!(
            "{}\n\n{}\n{}\n",
            lines.join("\n").trim(),
            ctx.marker,
            ctx.trailer
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> ReportContext {
        ReportContext::new("main")
    }

    fn persisted(body: &str) -> PersistedReport {
        PersistedReport {
            id: ReportId(7),
            body: body.to_string(),
            updated_at: None,
        }
    }

    fn entry(name: &str, level: EntryLevel) -> PipelineEntry {
        PipelineEntry {
            name: name.to_string(),
            url: format!("https://ci.example/{}", name),
            level,
        }
    }

    #[test]
    fn test_entry_line_grammar() {
        let parsed = PipelineEntry::parse_line("- [build](https://x/runs/1): warning").unwrap();
        assert_eq!(parsed.name, "build");
        assert_eq!(parsed.url, "https://x/runs/1");
        assert_eq!(parsed.level, EntryLevel::Warning);
        assert_eq!(parsed.to_line(), "- [build](https://x/runs/1): warning");

        assert!(PipelineEntry::parse_line("- [build](https://x): broken").is_none());
        assert!(PipelineEntry::parse_line("* [build](https://x): failure").is_none());
        assert!(PipelineEntry::parse_line("- [](https://x): failure").is_none());
        assert!(PipelineEntry::parse_line("see [build](https://x): failure").is_none());
    }

    #[test]
    fn test_parse_absent_is_fresh() {
        let report = Report::parse(None, &ctx());
        assert!(!report.exists());
        assert_eq!(report.preamble, vec![ctx().header, ctx().intro]);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_parse_splits_preamble_and_entries() {
        let body = format!(
            "**Workflow Status Tracker**\n\nintro text\n\n\n- [build](u1): failure\n- [lint](u2): warning\n\n{}\nold trailer\n- [ghost](u3): failure\n",
            ctx().marker
        );
        let report = Report::parse(Some(&persisted(&body)), &ctx());

        assert_eq!(report.id, Some(ReportId(7)));
        assert_eq!(report.preamble, vec!["**Workflow Status Tracker**", "intro text"]);
        assert_eq!(
            report.entries.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["build", "lint"]
        );
    }

    #[test]
    fn test_parse_unrecognized_body_is_preamble() {
        let report = Report::parse(Some(&persisted("just some\r\nfree text")), &ctx());
        assert!(report.exists());
        assert_eq!(report.preamble, vec!["just some", "free text"]);
        assert!(report.entries.is_empty());
    }

    #[test]
    fn test_parse_collapses_duplicate_names() {
        let body = "- [build](u1): failure\n- [build](u2): warning\n";
        let report = Report::parse(Some(&persisted(body)), &ctx());
        assert_eq!(report.entries.len(), 1);
        assert_eq!(report.entries[0].url, "u1");
    }

    #[test]
    fn test_render_fresh_report() {
        let report = Report::fresh(&ctx()).with_entry_upserted(entry("build", EntryLevel::Failure));
        let expected = format!(
            "{}\n\n{}\n\n- [build](https://ci.example/build): failure\n\n{}\n{}\n",
            ctx().header,
            ctx().intro,
            ctx().marker,
            ctx().trailer
        );
        assert_eq!(report.render(&ctx()), expected);
    }

    #[test]
    fn test_render_is_idempotent_through_parse() {
        let report = Report::fresh(&ctx())
            .with_entry_upserted(entry("build", EntryLevel::Failure))
            .with_entry_upserted(entry("lint", EntryLevel::Warning));
        let first = report.render(&ctx());
        assert_eq!(first, report.render(&ctx()));

        let reparsed = Report::parse(Some(&persisted(&first)), &ctx());
        assert_eq!(reparsed.preamble, report.preamble);
        assert_eq!(reparsed.entries, report.entries);
        assert_eq!(reparsed.render(&ctx()), first);
    }

    #[test]
    fn test_render_keeps_extra_preamble_lines() {
        let report = Report {
            preamble: vec!["head".into(), "intro".into(), "note one".into(), "note two".into()],
            entries: vec![entry("build", EntryLevel::Failure)],
            id: Some(ReportId(1)),
        };
        let rendered = report.render(&ctx());
        assert!(rendered.starts_with(
            "head\n\nintro\n\nnote one\nnote two\n- [build](https://ci.example/build): failure\n\n"
        ));
    }

    #[test]
    fn test_bracketed_name_survives_persist() {
        use crate::domain::observation::{Conclusion, PipelineObservation};
        use crate::domain::reconcile::reconcile;

        let observation = PipelineObservation::new("a](b", "https://ci/runs/1", Conclusion::Failure);
        let report = reconcile(Report::fresh(&ctx()), &observation, false);
        let saved = persisted(&report.render(&ctx()));

        let reparsed = Report::parse(Some(&saved), &ctx());
        assert_eq!(reparsed.entries, report.entries);

        let again = reconcile(reparsed, &observation, true);
        assert_eq!(again.entries.len(), 1);
        assert_eq!(again.entries[0].name, "a](b");
        assert_eq!(again.entries[0].level, EntryLevel::Warning);
    }

    #[test]
    fn test_upsert_preserves_position_and_remove_drops() {
        let report = Report::fresh(&ctx())
            .with_entry_upserted(entry("a", EntryLevel::Failure))
            .with_entry_upserted(entry("b", EntryLevel::Failure))
            .with_entry_upserted(entry("a", EntryLevel::Warning));
        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.entries[0].name, "a");
        assert_eq!(report.entries[0].level, EntryLevel::Warning);

        let report = report.with_entry_removed("a").with_entry_removed("missing");
        assert_eq!(report.entries, vec![entry("b", EntryLevel::Failure)]);
    }
}
