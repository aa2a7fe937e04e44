//! Pipeline observation types

use serde::{Deserialize, Serialize};

/// Conclusion of the latest completed run of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    /// Maps a GitHub run conclusion onto the two tracked states
    ///
    /// Only `success` counts as healthy. Cancelled, timed out, skipped and
    /// missing conclusions are all reported as failures.
    pub fn from_github(conclusion: Option<&str>) -> Self {
        match conclusion {
            Some(c) if c.eq_ignore_ascii_case("success") => Conclusion::Success,
            _ => Conclusion::Failure,
        }
    }
}

/// The newly observed outcome of one tracked pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineObservation {
    pub name: String,
    pub url: String,
    pub conclusion: Conclusion,
}

impl PipelineObservation {
    pub fn new(name: impl Into<String>, url: impl Into<String>, conclusion: Conclusion) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            conclusion,
        }
    }
}
