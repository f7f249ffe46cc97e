//! Text diff engine.
//!
//! Computes a minimal edit script between two texts with Myers' bisection,
//! sped up by affix trimming, containment shortcuts, the half-match heuristic
//! and a line-level pre-pass, then refines the script so that it reads the
//! way a person would describe the change.
//!
//! # Key Types
//!
//! - [`EditScript`] / [`EditOp`] / [`Op`] -- The edit script and its operations
//! - [`Deadline`] -- Monotonic time budget for the bisection search
//! - [`DiffOptions`] / [`Differ`] -- Configuration and a diff-plus-cleanup runner
//! - [`CleanupProfile`] -- Which refinement pass to run
//!
//! # Example
//!
//! ```
//! use tdiff_engine::{cleanup_semantic, diff, Deadline, EditOp};
//!
//! let mut script = diff("abc", "axc", false, Deadline::none());
//! cleanup_semantic(&mut script);
//! assert_eq!(
//!     script.ops,
//!     vec![
//!         EditOp::equal("a"),
//!         EditOp::delete("b"),
//!         EditOp::insert("x"),
//!         EditOp::equal("c"),
//!     ]
//! );
//! ```

mod affix;
mod bisect;
pub mod cleanup;
pub mod deadline;
mod delta;
pub mod engine;
pub mod error;
mod half_match;
mod lines;
pub mod op;
pub mod options;

pub use cleanup::{
    cleanup_efficiency, cleanup_merge, cleanup_semantic, cleanup_semantic_lossless, CleanupProfile,
};
pub use deadline::Deadline;
pub use engine::{diff, DEFAULT_LINE_MODE_THRESHOLD};
pub use error::{DiffError, DiffResult};
pub use op::{EditOp, EditScript, Op};
pub use options::{DiffOptions, Differ};
