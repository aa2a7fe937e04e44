//! Decides how the rendered report is written back

use serde::{Deserialize, Serialize};

use super::report::{Report, ReportId};

/// Write to perform against the persisted report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum WriteAction {
    /// No report exists and none is needed
    NoOp,
    Create { body: String },
    Update { id: ReportId, body: String },
    /// The report no longer lists any failing workflow
    Delete { id: ReportId },
}

impl WriteAction {
    /// Resolves the action from whether the report existed and whether it
    /// still lists any workflow
    pub fn resolve(report: &Report, rendered: String) -> Self {
        match (report.id, report.entries.is_empty()) {
            (None, true) => WriteAction::NoOp,
            (None, false) => WriteAction::Create { body: rendered },
            (Some(id), true) => WriteAction::Delete { id },
            (Some(id), false) => WriteAction::Update { id, body: rendered },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WriteAction::NoOp => "noop",
            WriteAction::Create { .. } => "create",
            WriteAction::Update { .. } => "update",
            WriteAction::Delete { .. } => "delete",
        }
    }
}
