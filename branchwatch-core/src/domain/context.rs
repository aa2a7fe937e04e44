//! Report context
//!
//! The fixed textual constants of the status report, with the main branch
//! name substituted in. Built once per invocation and passed by reference
//! to the parser and renderer.

/// Sentinel that identifies the status report among all PR comments
pub const REPORT_MARKER: &str = "<!-- unique_identifier: action_comment_marker -->";

/// First line of a freshly created report
pub const REPORT_HEADER: &str = "**Workflow Status Tracker**";

/// Tag that introduces an override directive in PR text
pub const OVERRIDE_TAG: &str = "ci override_main_branch_checks";

/// Immutable per-invocation report configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub main_branch: String,
    pub marker: String,
    pub header: String,
    pub intro: String,
    pub trailer: String,
}

impl ReportContext {
    /// Creates the context for a given main branch
    ///
    /// # Arguments
    /// * `main_branch` - Branch whose workflow runs are tracked (e.g., "main")
    pub fn new(main_branch: impl Into<String>) -> Self {
        let main_branch = main_branch.into();
        let intro = format!(
            "The following workflows are failing on {branch}. You can make specific workflows \
             not fail by adding [{tag} $workflow] to your PR description or bypass all by \
             adding [{tag}].",
            branch = main_branch,
            tag = OVERRIDE_TAG,
        );
        let trailer = format!(
            "This comment created by the main-branch-check action. It will be removed when \
             no workflows are red on the {} branch.",
            main_branch
        );

        Self {
            main_branch,
            marker: REPORT_MARKER.to_string(),
            header: REPORT_HEADER.to_string(),
            intro,
            trailer,
        }
    }
}
