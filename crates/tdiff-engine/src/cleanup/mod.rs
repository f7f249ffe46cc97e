//! Cleanup passes over an existing edit script.
//!
//! Each pass keeps both reconstructed texts intact and only changes how the
//! script partitions them. Callers pick a profile: [`cleanup_merge`] for a
//! normalised script, [`cleanup_semantic`] for human readers,
//! [`cleanup_semantic_lossless`] to only realign boundaries, or
//! [`cleanup_efficiency`] for compact machine-oriented scripts.

pub(crate) mod efficiency;
pub(crate) mod lossless;
pub(crate) mod merge;
pub(crate) mod semantic;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::op::EditScript;

/// Which cleanup to run after diffing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupProfile {
    /// Raw engine output (already merged).
    None,
    /// Merge cleanup only.
    Merge,
    /// Semantic cleanup, including boundary alignment.
    #[default]
    Semantic,
    /// Boundary alignment only.
    Lossless,
    /// Efficiency cleanup with the configured edit cost.
    Efficiency,
}

impl CleanupProfile {
    /// Run this profile over `script`.
    pub fn apply(self, script: &mut EditScript, edit_cost: usize) {
        match self {
            Self::None => {}
            Self::Merge => cleanup_merge(script),
            Self::Semantic => cleanup_semantic(script),
            Self::Lossless => cleanup_semantic_lossless(script),
            Self::Efficiency => cleanup_efficiency(script, edit_cost),
        }
    }
}

impl std::str::FromStr for CleanupProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "merge" => Ok(Self::Merge),
            "semantic" => Ok(Self::Semantic),
            "lossless" => Ok(Self::Lossless),
            "efficiency" => Ok(Self::Efficiency),
            other => Err(format!("unknown cleanup profile: {other}")),
        }
    }
}

/// Merge adjacent operations of the same kind and factor shared affixes out
/// of delete/insert runs.
pub fn cleanup_merge(script: &mut EditScript) {
    let mut spans = script.to_spans();
    merge::cleanup_merge(&mut spans);
    trace!(before = script.len(), after = spans.len(), "merge cleanup");
    *script = EditScript::from_spans(spans);
}

/// Remove equalities that are not worth keeping and realign boundaries for
/// human readers.
pub fn cleanup_semantic(script: &mut EditScript) {
    let mut spans = script.to_spans();
    semantic::cleanup_semantic(&mut spans);
    trace!(before = script.len(), after = spans.len(), "semantic cleanup");
    *script = EditScript::from_spans(spans);
}

/// Slide single edits to the most natural boundary without changing content.
pub fn cleanup_semantic_lossless(script: &mut EditScript) {
    let mut spans = script.to_spans();
    lossless::cleanup_lossless(&mut spans);
    trace!(before = script.len(), after = spans.len(), "lossless cleanup");
    *script = EditScript::from_spans(spans);
}

/// Fold short equalities into surrounding edits when `edit_cost` makes that
/// cheaper.
pub fn cleanup_efficiency(script: &mut EditScript, edit_cost: usize) {
    let mut spans = script.to_spans();
    efficiency::cleanup_efficiency(&mut spans, edit_cost);
    trace!(before = script.len(), after = spans.len(), edit_cost, "efficiency cleanup");
    *script = EditScript::from_spans(spans);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::EditOp;

    #[test]
    fn profile_parsing() {
        assert_eq!("Semantic".parse::<CleanupProfile>(), Ok(CleanupProfile::Semantic));
        assert_eq!("none".parse::<CleanupProfile>(), Ok(CleanupProfile::None));
        assert!("fancy".parse::<CleanupProfile>().is_err());
    }

    #[test]
    fn none_profile_leaves_script_alone() {
        let mut script = EditScript::from(vec![EditOp::equal("a"), EditOp::equal("b")]);
        let before = script.clone();
        CleanupProfile::None.apply(&mut script, 4);
        assert_eq!(script, before);
    }

    #[test]
    fn public_passes_round_trip_text() {
        let mut script = EditScript::from(vec![
            EditOp::equal("The c"),
            EditOp::delete("ow and the c"),
            EditOp::equal("at."),
        ]);
        cleanup_semantic_lossless(&mut script);
        assert_eq!(
            script.ops,
            vec![
                EditOp::equal("The "),
                EditOp::delete("cow and the "),
                EditOp::equal("cat."),
            ]
        );

        cleanup_merge(&mut script);
        assert_eq!(script.old_text(), "The cow and the cat.");
        assert_eq!(script.new_text(), "The cat.");
    }
}
