//! Efficiency cleanup: trade short equalities for fewer, larger edits when
//! the script is meant for machines rather than people.

use crate::cleanup::merge;
use crate::op::{Op, Span};

/// Fold equalities shorter than `edit_cost` into the surrounding edits when
/// doing so makes the script cheaper to apply.
///
/// An equality goes when edits of both kinds sit on both sides of it, or
/// when three of the four are present and the equality is shorter than half
/// the edit cost.
pub(crate) fn cleanup_efficiency<T: Copy + PartialEq>(spans: &mut Vec<Span<T>>, edit_cost: usize) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    let mut pre_insert = false;
    let mut pre_delete = false;
    let mut post_insert = false;
    let mut post_delete = false;

    while pointer < spans.len() {
        if spans[pointer].op == Op::Equal {
            let len = spans[pointer].items.len();
            if len > 0 && len < edit_cost && (post_insert || post_delete) {
                equalities.push(pointer);
                pre_insert = post_insert;
                pre_delete = post_delete;
                last_equality = Some(len);
            } else {
                equalities.clear();
                last_equality = None;
            }
            post_insert = false;
            post_delete = false;
            pointer += 1;
            continue;
        }

        if spans[pointer].op == Op::Delete {
            post_delete = true;
        } else {
            post_insert = true;
        }

        let flags = [pre_insert, pre_delete, post_insert, post_delete]
            .iter()
            .filter(|&&f| f)
            .count();
        let discard = last_equality
            .is_some_and(|len| flags == 4 || (flags == 3 && len * 2 < edit_cost));
        if discard {
            if let Some(&at) = equalities.last() {
                let items = spans[at].items.clone();
                spans.insert(at, Span::new(Op::Delete, items));
                spans[at + 1].op = Op::Insert;
                equalities.pop();
                last_equality = None;
                changed = true;
                if pre_insert && pre_delete {
                    // No changes made which could affect previous entries.
                    post_insert = true;
                    post_delete = true;
                    equalities.clear();
                } else {
                    equalities.pop();
                    pointer = equalities.last().map_or(0, |&i| i + 1);
                    post_insert = false;
                    post_delete = false;
                    continue;
                }
            }
        }
        pointer += 1;
    }

    if changed {
        merge::cleanup_merge(spans);
    }
}
