//! Common types used across CLI modules

use anyhow::{Result, anyhow};

/// A workflow reference as exposed by GitHub Actions (`github.workflow_ref`)
///
/// Format: `owner/repo/.github/workflows/ci.yml@refs/heads/main`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRef {
    /// Path of the workflow file relative to `.github/workflows/`
    pub file: String,
    /// Git ref the workflow was loaded from
    pub git_ref: String,
}

impl WorkflowRef {
    const WORKFLOWS_DIR: &'static str = "workflows/";

    /// Parse a workflow reference string
    ///
    /// The workflow file is the text between `workflows/` and `@`.
    pub fn parse(input: &str) -> Result<Self> {
        let (path, git_ref) = input
            .split_once('@')
            .ok_or_else(|| anyhow!("workflow ref '{}' has no '@<ref>' suffix", input))?;

        let start = path
            .find(Self::WORKFLOWS_DIR)
            .map(|index| index + Self::WORKFLOWS_DIR.len())
            .ok_or_else(|| {
                anyhow!("workflow ref '{}' does not point into a workflows directory", input)
            })?;

        let file = &path[start..];
        if file.is_empty() {
            return Err(anyhow!("workflow ref '{}' names no workflow file", input));
        }

        Ok(Self {
            file: file.to_string(),
            git_ref: git_ref.to_string(),
        })
    }

    /// Identifier accepted by the workflow runs API
    pub fn workflow_id(&self) -> &str {
        &self.file
    }
}

impl std::fmt::Display for WorkflowRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.file, self.git_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_workflow_ref() {
        let wf =
            WorkflowRef::parse("octo/widgets/.github/workflows/ci.yml@refs/heads/main").unwrap();
        assert_eq!(wf.workflow_id(), "ci.yml");
        assert_eq!(wf.git_ref, "refs/heads/main");
        assert_eq!(wf.to_string(), "ci.yml@refs/heads/main");
    }

    #[test]
    fn test_parse_pull_request_ref() {
        let wf =
            WorkflowRef::parse("o/r/.github/workflows/branch-check.yaml@refs/pull/12/merge").unwrap();
        assert_eq!(wf.workflow_id(), "branch-check.yaml");
    }

    #[test]
    fn test_reject_malformed_refs() {
        assert!(WorkflowRef::parse("o/r/.github/workflows/ci.yml").is_err());
        assert!(WorkflowRef::parse("o/r/ci.yml@refs/heads/main").is_err());
        assert!(WorkflowRef::parse("o/r/.github/workflows/@refs/heads/main").is_err());
    }
}
