//! Issue comment DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::report::{PersistedReport, ReportId};

/// A comment on an issue or pull request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl IssueComment {
    /// Whether this comment carries the report marker
    pub fn has_marker(&self, marker: &str) -> bool {
        self.body.as_deref().is_some_and(|body| body.contains(marker))
    }
}

impl From<IssueComment> for PersistedReport {
    fn from(comment: IssueComment) -> Self {
        Self {
            id: ReportId(comment.id),
            body: comment.body.unwrap_or_default(),
            updated_at: Some(comment.updated_at),
        }
    }
}

/// Request body to create or edit a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentBody {
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_deserialization() {
        let json = r#"{
            "id": 1234,
            "body": "hello <!-- m -->",
            "html_url": "https://github.com/o/r/pull/1#issuecomment-1234",
            "user": {"login": "bot"},
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T11:00:00Z"
        }"#;
        let comment: IssueComment = serde_json::from_str(json).unwrap();
        assert!(comment.has_marker("<!-- m -->"));
        assert!(!comment.has_marker("<!-- other -->"));

        let report: PersistedReport = comment.into();
        assert_eq!(report.id, ReportId(1234));
        assert_eq!(report.body, "hello <!-- m -->");
        assert!(report.updated_at.is_some());
    }

    #[test]
    fn test_null_body_has_no_marker() {
        let json = r#"{"id": 1, "body": null,
            "created_at": "2024-05-01T10:00:00Z", "updated_at": "2024-05-01T10:00:00Z"}"#;
        let comment: IssueComment = serde_json::from_str(json).unwrap();
        assert!(!comment.has_marker("x"));
    }
}
