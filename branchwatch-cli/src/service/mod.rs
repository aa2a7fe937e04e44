//! Service layer
//!
//! Services contain the orchestration logic of the CLI. They drive the pure
//! reconciliation engine from `branchwatch-core` through the repositories.

mod check;

pub use check::{CheckReport, CheckService, CheckSettings, DEFAULT_MAX_ATTEMPTS};
