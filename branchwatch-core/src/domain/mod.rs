//! Core domain types
//!
//! The reconciliation engine for the workflow status report: override
//! directive scanning, report parsing and rendering, merging a new workflow
//! observation, and deciding the write action and job outcome. Everything
//! here is pure; I/O lives in the client and CLI crates.

pub mod action;
pub mod context;
pub mod engine;
pub mod observation;
pub mod outcome;
pub mod override_flag;
pub mod reconcile;
pub mod report;

pub use action::WriteAction;
pub use context::ReportContext;
pub use engine::{Evaluation, evaluate};
pub use observation::{Conclusion, PipelineObservation};
pub use outcome::{FailReason, Outcome};
pub use override_flag::{OverrideDiagnostic, OverrideFlag, OverrideScan};
pub use report::{EntryLevel, PersistedReport, PipelineEntry, Report, ReportId};
