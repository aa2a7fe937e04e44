//! Repository layer
//!
//! Repositories are thin adapters over the GitHub client. They expose the
//! reads and writes the check service needs, in domain terms, without any
//! business logic.
//!
//! All repositories are trait-based so the service can be tested against
//! in-memory fakes.

mod pulls;
mod reports;
mod runs;

// Re-export traits
pub use pulls::PullRequestRepository;
pub use reports::ReportRepository;
pub use runs::RunRepository;

// Re-export implementations
pub use pulls::GitHubPullRequestRepository;
pub use reports::GitHubReportRepository;
pub use runs::GitHubRunRepository;
