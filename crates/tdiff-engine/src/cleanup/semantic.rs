//! Semantic cleanup: drop equalities that are too small to be worth keeping
//! and turn overlapping delete/insert pairs into an explicit equality.

use crate::affix::common_overlap;
use crate::cleanup::{lossless, merge};
use crate::op::{Op, Span};

/// Eliminate semantically trivial equalities.
///
/// An equality no longer than the edits on both of its sides is folded into
/// them. Afterwards the script is merged, boundaries are realigned, and
/// delete/insert pairs that overlap by at least half of either side are split
/// around the shared text.
pub(crate) fn cleanup_semantic(spans: &mut Vec<Span<char>>) {
    let mut changed = false;
    // Indices of equalities still eligible for removal.
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<usize> = None;
    let mut pointer = 0;
    // Characters changed before and after the last equality.
    let mut inserted_before = 0;
    let mut deleted_before = 0;
    let mut inserted_after = 0;
    let mut deleted_after = 0;

    while pointer < spans.len() {
        if spans[pointer].op == Op::Equal {
            equalities.push(pointer);
            inserted_before = inserted_after;
            deleted_before = deleted_after;
            inserted_after = 0;
            deleted_after = 0;
            let len = spans[pointer].items.len();
            last_equality = (len > 0).then_some(len);
            pointer += 1;
            continue;
        }

        let len = spans[pointer].items.len();
        if spans[pointer].op == Op::Insert {
            inserted_after += len;
        } else {
            deleted_after += len;
        }

        let discard = last_equality.is_some_and(|eq_len| {
            eq_len <= inserted_before.max(deleted_before)
                && eq_len <= inserted_after.max(deleted_after)
        });
        if discard {
            if let Some(&at) = equalities.last() {
                // Replace the equality with a delete followed by an insert.
                let items = spans[at].items.clone();
                spans.insert(at, Span::new(Op::Delete, items));
                spans[at + 1].op = Op::Insert;
                // Drop the discarded equality and re-evaluate the one before.
                equalities.pop();
                equalities.pop();
                pointer = equalities.last().map_or(0, |&i| i + 1);
                inserted_before = 0;
                deleted_before = 0;
                inserted_after = 0;
                deleted_after = 0;
                last_equality = None;
                changed = true;
                continue;
            }
        }
        pointer += 1;
    }

    if changed {
        merge::cleanup_merge(spans);
    }
    lossless::cleanup_lossless(spans);
    extract_overlaps(spans);
}

/// Split overlapping delete/insert pairs around their shared text:
/// `<del>abcxxx</del><ins>xxxdef</ins>` becomes
/// `<del>abc</del>xxx<ins>def</ins>`, and
/// `<del>xxxabc</del><ins>defxxx</ins>` becomes
/// `<ins>def</ins>xxx<del>abc</del>`.
fn extract_overlaps(spans: &mut Vec<Span<char>>) {
    let mut pointer = 1;
    while pointer < spans.len() {
        if spans[pointer - 1].op == Op::Delete && spans[pointer].op == Op::Insert {
            let deletion = spans[pointer - 1].items.clone();
            let insertion = spans[pointer].items.clone();
            let forward = common_overlap(&deletion, &insertion);
            let reverse = common_overlap(&insertion, &deletion);
            if forward >= reverse {
                if forward * 2 >= deletion.len() || forward * 2 >= insertion.len() {
                    spans.insert(pointer, Span::equal(&insertion[..forward]));
                    spans[pointer - 1].items = deletion[..deletion.len() - forward].to_vec();
                    spans[pointer + 1].items = insertion[forward..].to_vec();
                    pointer += 1;
                }
            } else if reverse * 2 >= deletion.len() || reverse * 2 >= insertion.len() {
                spans.insert(pointer, Span::equal(&deletion[..reverse]));
                spans[pointer - 1] = Span::insert(&insertion[..insertion.len() - reverse]);
                spans[pointer + 1] = Span::delete(&deletion[reverse..]);
                pointer += 1;
            }
            pointer += 1;
        }
        pointer += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(op: Op, s: &str) -> Span<char> {
        Span::new(op, s.chars().collect())
    }

    fn del(s: &str) -> Span<char> {
        span(Op::Delete, s)
    }

    fn ins(s: &str) -> Span<char> {
        span(Op::Insert, s)
    }

    fn eq(s: &str) -> Span<char> {
        span(Op::Equal, s)
    }

    fn cleaned(mut spans: Vec<Span<char>>) -> Vec<Span<char>> {
        cleanup_semantic(&mut spans);
        spans
    }

    #[test]
    fn empty_script() {
        assert!(cleaned(vec![]).is_empty());
    }

    #[test]
    fn keeps_meaningful_equalities() {
        let spans = vec![del("ab"), ins("cd"), eq("12"), del("e")];
        assert_eq!(cleaned(spans.clone()), spans);

        let spans = vec![del("abc"), ins("ABC"), eq("1234"), del("wxyz")];
        assert_eq!(cleaned(spans.clone()), spans);
    }

    #[test]
    fn simple_elimination() {
        assert_eq!(
            cleaned(vec![del("a"), eq("b"), del("c")]),
            vec![del("abc"), ins("b")]
        );
    }

    #[test]
    fn backpass_elimination() {
        assert_eq!(
            cleaned(vec![del("ab"), eq("cd"), del("e"), eq("f"), ins("g")]),
            vec![del("abcdef"), ins("cdfg")]
        );
    }

    #[test]
    fn multiple_eliminations() {
        assert_eq!(
            cleaned(vec![
                ins("1"),
                eq("A"),
                del("B"),
                ins("2"),
                eq("_"),
                ins("1"),
                eq("A"),
                del("B"),
                ins("2"),
            ]),
            vec![del("AB_AB"), ins("1A2_1A2")]
        );
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(
            cleaned(vec![eq("The c"), del("ow and the c"), eq("at.")]),
            vec![eq("The "), del("cow and the "), eq("cat.")]
        );
    }

    #[test]
    fn overlap_below_threshold_is_kept() {
        let spans = vec![del("abcxx"), ins("xxdef")];
        assert_eq!(cleaned(spans.clone()), spans);
    }

    #[test]
    fn forward_overlap_extracted() {
        assert_eq!(
            cleaned(vec![del("abcxxx"), ins("xxxdef")]),
            vec![del("abc"), eq("xxx"), ins("def")]
        );
    }

    #[test]
    fn reverse_overlap_extracted() {
        assert_eq!(
            cleaned(vec![del("xxxabc"), ins("defxxx")]),
            vec![ins("def"), eq("xxx"), del("abc")]
        );
    }

    #[test]
    fn two_overlaps() {
        assert_eq!(
            cleaned(vec![
                del("abcd1212"),
                ins("1212efghi"),
                eq("----"),
                del("A3"),
                ins("3BC"),
            ]),
            vec![
                del("abcd"),
                eq("1212"),
                ins("efghi"),
                eq("----"),
                del("A"),
                eq("3"),
                ins("BC"),
            ]
        );
    }
}
