//! Edit operations and edit scripts.
//!
//! An [`EditScript`] is the ordered list of [`EditOp`]s that turns the old
//! text into the new one. Replaying `Delete` + `Equal` segments yields the old
//! text, replaying `Insert` + `Equal` segments yields the new text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of an edit operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Op {
    /// Text present only in the old input.
    Delete,
    /// Text present only in the new input.
    Insert,
    /// Text present unchanged in both inputs.
    Equal,
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Delete => write!(f, "Delete"),
            Self::Insert => write!(f, "Insert"),
            Self::Equal => write!(f, "Equal"),
        }
    }
}

/// A single operation of an edit script, owning its text segment.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditOp {
    pub op: Op,
    pub text: String,
}

impl EditOp {
    pub fn new(op: Op, text: impl Into<String>) -> Self {
        Self {
            op,
            text: text.into(),
        }
    }

    pub fn delete(text: impl Into<String>) -> Self {
        Self::new(Op::Delete, text)
    }

    pub fn insert(text: impl Into<String>) -> Self {
        Self::new(Op::Insert, text)
    }

    pub fn equal(text: impl Into<String>) -> Self {
        Self::new(Op::Equal, text)
    }
}

impl fmt::Display for EditOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.op, self.text)
    }
}

/// An ordered sequence of edit operations.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditScript {
    /// The operations, in order.
    pub ops: Vec<EditOp>,
}

impl EditScript {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the script has no operations.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EditOp> {
        self.ops.iter()
    }

    /// Returns `true` if every operation is an equality.
    pub fn is_unchanged(&self) -> bool {
        self.ops.iter().all(|o| o.op == Op::Equal)
    }

    /// Reconstruct the old text (`Delete` + `Equal` segments).
    pub fn old_text(&self) -> String {
        self.ops
            .iter()
            .filter(|o| o.op != Op::Insert)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// Reconstruct the new text (`Insert` + `Equal` segments).
    pub fn new_text(&self) -> String {
        self.ops
            .iter()
            .filter(|o| o.op != Op::Delete)
            .map(|o| o.text.as_str())
            .collect()
    }

    /// The old-version view: `Equal` and `Delete` operations, in order.
    pub fn old_view(&self) -> Vec<EditOp> {
        self.ops
            .iter()
            .filter(|o| o.op != Op::Insert)
            .cloned()
            .collect()
    }

    /// The new-version view: `Equal` and `Insert` operations, in order.
    pub fn new_view(&self) -> Vec<EditOp> {
        self.ops
            .iter()
            .filter(|o| o.op != Op::Delete)
            .cloned()
            .collect()
    }

    /// Levenshtein distance in code points, derived from the script.
    ///
    /// Each run of edits between two equalities costs the larger of its
    /// inserted and deleted lengths.
    pub fn levenshtein(&self) -> usize {
        let mut distance = 0;
        let mut inserted = 0;
        let mut deleted = 0;
        for o in &self.ops {
            let len = o.text.chars().count();
            match o.op {
                Op::Insert => inserted += len,
                Op::Delete => deleted += len,
                Op::Equal => {
                    distance += inserted.max(deleted);
                    inserted = 0;
                    deleted = 0;
                }
            }
        }
        distance + inserted.max(deleted)
    }

    /// Translate a code-point location in the old text to the equivalent
    /// location in the new text.
    ///
    /// A location inside a deleted segment maps to the start of that
    /// deletion in the new text.
    pub fn x_index(&self, loc: usize) -> usize {
        let mut old_chars = 0;
        let mut new_chars = 0;
        let mut last_old = 0;
        let mut last_new = 0;
        let mut hit = None;
        for o in &self.ops {
            let len = o.text.chars().count();
            if o.op != Op::Insert {
                old_chars += len;
            }
            if o.op != Op::Delete {
                new_chars += len;
            }
            if old_chars > loc {
                hit = Some(o.op);
                break;
            }
            last_old = old_chars;
            last_new = new_chars;
        }
        if hit == Some(Op::Delete) {
            return last_new;
        }
        last_new + (loc - last_old)
    }

    pub(crate) fn from_spans(spans: Vec<Span<char>>) -> Self {
        Self {
            ops: spans
                .into_iter()
                .map(|s| EditOp::new(s.op, s.items.into_iter().collect::<String>()))
                .collect(),
        }
    }

    pub(crate) fn to_spans(&self) -> Vec<Span<char>> {
        self.ops
            .iter()
            .map(|o| Span::new(o.op, o.text.chars().collect()))
            .collect()
    }
}

impl From<Vec<EditOp>> for EditScript {
    fn from(ops: Vec<EditOp>) -> Self {
        Self { ops }
    }
}

impl IntoIterator for EditScript {
    type Item = EditOp;
    type IntoIter = std::vec::IntoIter<EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a EditOp;
    type IntoIter = std::slice::Iter<'a, EditOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

/// Working representation used inside the engine: an operation over a run of
/// symbols (code points, or line symbols in line mode).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Span<T> {
    pub op: Op,
    pub items: Vec<T>,
}

impl<T: Copy> Span<T> {
    pub fn new(op: Op, items: Vec<T>) -> Self {
        Self { op, items }
    }

    pub fn delete(items: &[T]) -> Self {
        Self::new(Op::Delete, items.to_vec())
    }

    pub fn insert(items: &[T]) -> Self {
        Self::new(Op::Insert, items.to_vec())
    }

    pub fn equal(items: &[T]) -> Self {
        Self::new(Op::Equal, items.to_vec())
    }
}
