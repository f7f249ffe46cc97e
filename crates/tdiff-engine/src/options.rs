//! Diff configuration and the [`Differ`] convenience wrapper.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cleanup::CleanupProfile;
use crate::deadline::Deadline;
use crate::engine::{diff_with, DiffContext, DEFAULT_LINE_MODE_THRESHOLD};
use crate::error::{DiffError, DiffResult};
use crate::op::EditScript;

/// Tunables for a diff invocation.
///
/// Every field has a default, so partial TOML documents are accepted:
///
/// ```toml
/// timeout_ms = 250   # 0 for no limit
/// cleanup = "efficiency"
/// edit_cost = 6
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Time budget in milliseconds. Zero means unlimited, which also turns
    /// off the half-match shortcut.
    pub timeout_ms: u64,
    /// Run a line-level pass first on long texts.
    pub line_mode: bool,
    /// Both texts must be longer than this for line mode to engage.
    pub line_mode_threshold: usize,
    /// Allow the half-match shortcut when a time budget is set.
    pub allow_half_match: bool,
    /// Cost of an empty edit operation, in characters, for efficiency cleanup.
    pub edit_cost: usize,
    /// Cleanup applied by [`Differ::diff_text`].
    pub cleanup: CleanupProfile,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 1000,
            line_mode: true,
            line_mode_threshold: DEFAULT_LINE_MODE_THRESHOLD,
            allow_half_match: true,
            edit_cost: 4,
            cleanup: CleanupProfile::Semantic,
        }
    }
}

impl DiffOptions {
    /// Parse options from a TOML document.
    pub fn from_toml_str(s: &str) -> DiffResult<Self> {
        toml::from_str(s).map_err(|e| DiffError::InvalidOptions(e.to_string()))
    }

    /// Serialize options as TOML.
    pub fn to_toml_string(&self) -> DiffResult<String> {
        toml::to_string(self).map_err(|e| DiffError::InvalidOptions(e.to_string()))
    }

    /// The configured time budget, `None` when unlimited.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// Start the clock: a deadline measured from now.
    pub fn deadline(&self) -> Deadline {
        Deadline::from(self.timeout())
    }
}

/// Runs diffs with a fixed set of options.
#[derive(Clone, Debug, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diff without cleanup beyond the engine's own merge.
    pub fn diff_raw(&self, old: &str, new: &str) -> EditScript {
        let ctx = DiffContext {
            deadline: self.options.deadline(),
            line_mode: self.options.line_mode,
            line_mode_threshold: self.options.line_mode_threshold,
            half_match: self.options.allow_half_match,
        };
        diff_with(old, new, ctx)
    }

    /// Diff and apply the configured cleanup profile.
    pub fn diff_text(&self, old: &str, new: &str) -> EditScript {
        let mut script = self.diff_raw(old, new);
        self.options.cleanup.apply(&mut script, self.options.edit_cost);
        debug!(
            ops = script.len(),
            cleanup = ?self.options.cleanup,
            "diff complete"
        );
        script
    }

    /// Diff optional inputs; absent text is treated as empty.
    pub fn diff_opt(&self, old: Option<&str>, new: Option<&str>) -> EditScript {
        self.diff_text(old.unwrap_or_default(), new.unwrap_or_default())
    }
}
