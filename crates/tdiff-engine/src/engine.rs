//! The diff driver: affix trimming, shortcuts, half-match, line mode and the
//! bisection fallback.

use tracing::debug;

use crate::affix::{common_prefix, common_suffix, find};
use crate::bisect::bisect;
use crate::cleanup::{merge, semantic};
use crate::deadline::Deadline;
use crate::half_match::half_match;
use crate::lines::{LineSymbolTable, MAX_NEW_LINES, MAX_OLD_LINES};
use crate::op::{EditScript, Op, Span};

/// Default length both texts must exceed before line mode engages.
pub const DEFAULT_LINE_MODE_THRESHOLD: usize = 100;

/// Per-invocation settings threaded through the recursion.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DiffContext {
    pub deadline: Deadline,
    pub line_mode: bool,
    pub line_mode_threshold: usize,
    pub half_match: bool,
}

impl DiffContext {
    pub fn new(deadline: Deadline) -> Self {
        Self {
            deadline,
            line_mode: false,
            line_mode_threshold: DEFAULT_LINE_MODE_THRESHOLD,
            half_match: true,
        }
    }

    pub fn with_line_mode(mut self, line_mode: bool) -> Self {
        self.line_mode = line_mode;
        self
    }
}

/// A unit the engine can diff: a code point, or a line symbol.
pub(crate) trait Symbol: Copy + PartialEq {
    /// Line-level pre-pass. Only text supports it.
    fn diff_lines(_old: &[Self], _new: &[Self], _ctx: DiffContext) -> Option<Vec<Span<Self>>> {
        None
    }
}

impl Symbol for u32 {}

impl Symbol for char {
    fn diff_lines(old: &[char], new: &[char], ctx: DiffContext) -> Option<Vec<Span<char>>> {
        Some(line_mode(old, new, ctx))
    }
}

/// Compute the edit script turning `old` into `new`.
///
/// `line_mode` enables the line-level speedup for long texts; `deadline`
/// bounds the time spent in bisection and enables the half-match shortcut.
/// The result is merge-cleaned but otherwise raw; apply one of the cleanup
/// passes for human-oriented output.
pub fn diff(old: &str, new: &str, line_mode: bool, deadline: Deadline) -> EditScript {
    let ctx = DiffContext::new(deadline).with_line_mode(line_mode);
    diff_with(old, new, ctx)
}

pub(crate) fn diff_with(old: &str, new: &str, ctx: DiffContext) -> EditScript {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();
    EditScript::from_spans(diff_main(&old, &new, ctx))
}

/// Trim common affixes, diff the middle and merge the result.
pub(crate) fn diff_main<T: Symbol>(old: &[T], new: &[T], ctx: DiffContext) -> Vec<Span<T>> {
    if old == new {
        if old.is_empty() {
            return Vec::new();
        }
        return vec![Span::equal(old)];
    }

    let prefix = common_prefix(old, new);
    let (old_body, new_body) = (&old[prefix..], &new[prefix..]);
    let suffix = common_suffix(old_body, new_body);
    let old_mid = &old_body[..old_body.len() - suffix];
    let new_mid = &new_body[..new_body.len() - suffix];

    let mut spans = Vec::new();
    if prefix > 0 {
        spans.push(Span::equal(&old[..prefix]));
    }
    spans.extend(compute(old_mid, new_mid, ctx));
    if suffix > 0 {
        spans.push(Span::equal(&old_body[old_body.len() - suffix..]));
    }
    merge::cleanup_merge(&mut spans);
    spans
}

/// Diff two sequences that share no common prefix or suffix.
fn compute<T: Symbol>(old: &[T], new: &[T], ctx: DiffContext) -> Vec<Span<T>> {
    if old.is_empty() {
        return vec![Span::insert(new)];
    }
    if new.is_empty() {
        return vec![Span::delete(old)];
    }

    let old_is_long = old.len() > new.len();
    let (long, short) = if old_is_long { (old, new) } else { (new, old) };
    if let Some(i) = find(long, short, 0) {
        // The shorter text sits inside the longer one.
        let op = if old_is_long { Op::Delete } else { Op::Insert };
        return vec![
            Span::new(op, long[..i].to_vec()),
            Span::equal(short),
            Span::new(op, long[i + short.len()..].to_vec()),
        ];
    }
    if short.len() == 1 {
        // A lone symbol that is not contained in the other side cannot be an
        // equality.
        return vec![Span::delete(old), Span::insert(new)];
    }

    if ctx.half_match {
        if let Some(hm) = half_match(old, new, ctx.deadline) {
            debug!(common = hm.common.len(), "half-match split");
            let mut spans = diff_main(hm.old_prefix, hm.new_prefix, ctx);
            spans.push(Span::equal(hm.common));
            spans.extend(diff_main(hm.old_suffix, hm.new_suffix, ctx));
            return spans;
        }
    }

    if ctx.line_mode && old.len() > ctx.line_mode_threshold && new.len() > ctx.line_mode_threshold {
        if let Some(spans) = T::diff_lines(old, new, ctx) {
            return spans;
        }
    }

    bisect(old, new, ctx)
}

/// Diff line by line first, then refine every replaced block per character.
fn line_mode(old: &[char], new: &[char], ctx: DiffContext) -> Vec<Span<char>> {
    let mut table = LineSymbolTable::new();
    let old_symbols = table.encode(old, MAX_OLD_LINES);
    let new_symbols = table.encode(new, MAX_NEW_LINES);
    debug!(
        old_lines = old_symbols.len(),
        new_lines = new_symbols.len(),
        distinct = table.len() - 1,
        "line mode engaged"
    );

    let char_ctx = ctx.with_line_mode(false);
    let symbol_spans = diff_main(&old_symbols, &new_symbols, char_ctx);
    let mut spans = table.decode(symbol_spans);

    // Drop freak matches such as a lone shared blank line.
    semantic::cleanup_semantic(&mut spans);

    // Re-diff each replacement block at character granularity. The trailing
    // empty equality flushes the final block.
    spans.push(Span::new(Op::Equal, Vec::new()));
    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete: Vec<char> = Vec::new();
    let mut text_insert: Vec<char> = Vec::new();
    while pointer < spans.len() {
        match spans[pointer].op {
            Op::Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&spans[pointer].items);
            }
            Op::Delete => {
                count_delete += 1;
                text_delete.extend_from_slice(&spans[pointer].items);
            }
            Op::Equal => {
                if count_delete >= 1 && count_insert >= 1 {
                    let start = pointer - count_delete - count_insert;
                    let refined = diff_main(&text_delete, &text_insert, char_ctx);
                    let refined_len = refined.len();
                    spans.splice(start..pointer, refined);
                    pointer = start + refined_len;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
        pointer += 1;
    }
    spans.pop();
    spans
}
