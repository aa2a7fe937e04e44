//! Override directives
//!
//! Authors can exempt failing main-branch workflows from failing their PR by
//! writing `[ci override_main_branch_checks <workflow>]` (one workflow) or
//! `[ci override_main_branch_checks]` (every workflow) in the PR description.
//! This module scans free text for those directives.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::context::OVERRIDE_TAG;

/// Scope of a single override directive
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverrideFlag {
    /// Unscoped directive, covers every workflow
    All,
    /// Directive naming one workflow
    Named(String),
}

impl fmt::Display for OverrideFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideFlag::All => write!(f, "all"),
            OverrideFlag::Named(name) => write!(f, "{}", name),
        }
    }
}

/// Non-fatal findings recorded while scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverrideDiagnostic {
    /// An unscoped directive was found but global overrides are disabled
    GlobalOverrideDisallowed,
}

impl fmt::Display for OverrideDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverrideDiagnostic::GlobalOverrideDisallowed => write!(
                f,
                "Override flag was set for all workflows, but overriding all is not allowed. \
                 Please specify workflows to override."
            ),
        }
    }
}

/// Flags and diagnostics extracted from one piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideScan {
    pub flags: BTreeSet<OverrideFlag>,
    pub diagnostics: Vec<OverrideDiagnostic>,
}

impl OverrideScan {
    /// Scans `text` for override directives
    ///
    /// Absent text yields an empty scan. Unscoped directives only produce
    /// [`OverrideFlag::All`] when `allow_scope_all` is set; otherwise they are
    /// dropped with a [`OverrideDiagnostic::GlobalOverrideDisallowed`].
    pub fn parse(text: Option<&str>, allow_scope_all: bool) -> Self {
        let mut scan = Self::default();
        let Some(text) = text else {
            return scan;
        };

        for directive in DirectiveMatcher::new(text) {
            match directive {
                Directive::Unscoped if allow_scope_all => {
                    scan.flags.insert(OverrideFlag::All);
                }
                Directive::Unscoped => {
                    let diagnostic = OverrideDiagnostic::GlobalOverrideDisallowed;
                    warn!("{}", diagnostic);
                    scan.diagnostics.push(diagnostic);
                }
                Directive::Scoped(name) => {
                    scan.flags.insert(OverrideFlag::Named(name.to_string()));
                }
            }
        }

        scan
    }

    /// Whether the named workflow is overridden
    ///
    /// A directive naming `all` only covers a workflow literally called
    /// `all`; the global scope comes from unscoped directives alone.
    pub fn covers(&self, workflow: &str) -> bool {
        self.flags.contains(&OverrideFlag::All)
            || self
                .flags
                .iter()
                .any(|flag| matches!(flag, OverrideFlag::Named(name) if name == workflow))
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

/// A matched directive, borrowing its scope from the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    Unscoped,
    Scoped(&'a str),
}

/// Iterator over the non-overlapping directives of a text
///
/// Matching is ASCII case-insensitive on the tag. `folded` keeps the same
/// byte offsets as `text` since only ASCII bytes are lowered.
struct DirectiveMatcher<'a> {
    text: &'a str,
    folded: String,
    opener: String,
    pos: usize,
}

impl<'a> DirectiveMatcher<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            folded: text.to_ascii_lowercase(),
            opener: format!("[{}", OVERRIDE_TAG),
            pos: 0,
        }
    }

    /// Matches what follows the tag: `]`, or blanks then a scope then `]`.
    ///
    /// Returns the directive and the number of bytes consumed.
    fn match_tail(tail: &'a str) -> Option<(Directive<'a>, usize)> {
        let scope = tail.trim_start_matches([' ', '\t']);
        let blanks = tail.len() - scope.len();

        if scope.starts_with(']') {
            return Some((Directive::Unscoped, blanks + 1));
        }
        if blanks == 0 {
            return None;
        }

        let close = scope.find([']', '\n', '\r'])?;
        if !scope[close..].starts_with(']') {
            return None;
        }

        Some((Directive::Scoped(&scope[..close]), blanks + close + 1))
    }
}

impl<'a> Iterator for DirectiveMatcher<'a> {
    type Item = Directive<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.text.len() {
            let text: &'a str = self.text;
            let start = self.pos + self.folded[self.pos..].find(self.opener.as_str())?;
            let after = start + self.opener.len();

            if let Some((directive, consumed)) = Self::match_tail(&text[after..]) {
                self.pos = after + consumed;
                return Some(directive);
            }

            // `[` is a single byte, so the next offset is a char boundary
            self.pos = start + 1;
        }
        None
    }
}
