//! Structural normalisation of an edit script.

use crate::affix::{common_prefix, common_suffix};
use crate::op::{Op, Span};

/// Merge adjacent same-kind operations, factor common affixes out of
/// delete/insert runs into the surrounding equalities, and slide single edits
/// across a neighbouring equality when that eliminates it.
///
/// Runs until stable. Afterwards no two adjacent spans share an operation and
/// no span is empty.
pub(crate) fn cleanup_merge<T: Copy + PartialEq>(spans: &mut Vec<Span<T>>) {
    loop {
        merge_runs(spans);
        if !shift_single_edits(spans) {
            break;
        }
    }
}

fn merge_runs<T: Copy + PartialEq>(spans: &mut Vec<Span<T>>) {
    spans.retain(|s| !s.items.is_empty());
    // Trailing empty equality flushes the last run.
    spans.push(Span::new(Op::Equal, Vec::new()));

    let mut pointer = 0;
    let mut count_delete = 0;
    let mut count_insert = 0;
    let mut text_delete: Vec<T> = Vec::new();
    let mut text_insert: Vec<T> = Vec::new();

    while pointer < spans.len() {
        match spans[pointer].op {
            Op::Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&spans[pointer].items);
                pointer += 1;
            }
            Op::Delete => {
                count_delete += 1;
                text_delete.extend_from_slice(&spans[pointer].items);
                pointer += 1;
            }
            Op::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let prefix = common_prefix(&text_insert, &text_delete);
                        if prefix != 0 {
                            let run_start = pointer - count_delete - count_insert;
                            if run_start > 0 && spans[run_start - 1].op == Op::Equal {
                                spans[run_start - 1]
                                    .items
                                    .extend_from_slice(&text_insert[..prefix]);
                            } else {
                                spans.insert(0, Span::equal(&text_insert[..prefix]));
                                pointer += 1;
                            }
                            text_insert.drain(..prefix);
                            text_delete.drain(..prefix);
                        }

                        let suffix = common_suffix(&text_insert, &text_delete);
                        if suffix != 0 {
                            let tail = text_insert.split_off(text_insert.len() - suffix);
                            text_delete.truncate(text_delete.len() - suffix);
                            spans[pointer].items.splice(0..0, tail);
                        }
                    }

                    // Replace the run with at most one delete and one insert.
                    pointer -= count_delete + count_insert;
                    spans.drain(pointer..pointer + count_delete + count_insert);
                    if !text_delete.is_empty() {
                        spans.insert(
                            pointer,
                            Span::new(Op::Delete, std::mem::take(&mut text_delete)),
                        );
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        spans.insert(
                            pointer,
                            Span::new(Op::Insert, std::mem::take(&mut text_insert)),
                        );
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && spans[pointer - 1].op == Op::Equal {
                    let items = spans.remove(pointer).items;
                    spans[pointer - 1].items.extend(items);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }

    if spans.last().is_some_and(|s| s.items.is_empty()) {
        spans.pop();
    }
}

/// Slide single edits surrounded by equalities, e.g. `A<ins>BA</ins>C` becomes
/// `<ins>AB</ins>AC`. Returns `true` if anything moved.
fn shift_single_edits<T: Copy + PartialEq>(spans: &mut Vec<Span<T>>) -> bool {
    let mut changed = false;
    let mut pointer = 1;
    while pointer + 1 < spans.len() {
        if spans[pointer - 1].op == Op::Equal && spans[pointer + 1].op == Op::Equal {
            if spans[pointer].items.ends_with(&spans[pointer - 1].items) {
                // Shift the edit over the previous equality.
                let prev = spans.remove(pointer - 1).items;
                pointer -= 1;
                let edit = &mut spans[pointer].items;
                edit.truncate(edit.len() - prev.len());
                edit.splice(0..0, prev.iter().copied());
                spans[pointer + 1].items.splice(0..0, prev);
                changed = true;
            } else if spans[pointer].items.starts_with(&spans[pointer + 1].items) {
                // Shift the edit over the next equality.
                let next = spans.remove(pointer + 1).items;
                spans[pointer - 1].items.extend_from_slice(&next);
                let edit = &mut spans[pointer].items;
                edit.drain(..next.len());
                edit.extend(next);
                changed = true;
            }
        }
        pointer += 1;
    }
    changed
}
