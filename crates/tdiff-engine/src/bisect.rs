//! Myers' O(ND) bisection: find the middle snake and split the problem.
//!
//! Both frontiers advance one edit per round, the forward one from the top
//! left of the edit graph and the reverse one from the bottom right. The
//! first diagonal on which they overlap yields a split point; the halves on
//! either side are diffed independently.

use tracing::debug;

use crate::engine::{diff_main, DiffContext, Symbol};
use crate::op::Span;

/// Diff two non-empty sequences with no common prefix or suffix.
///
/// If the deadline elapses first, or the sequences share nothing at all, the
/// result is a plain delete of `old` followed by an insert of `new`.
pub(crate) fn bisect<T: Symbol>(old: &[T], new: &[T], ctx: DiffContext) -> Vec<Span<T>> {
    let old_len = old.len() as isize;
    let new_len = new.len() as isize;
    let max_d = (old_len + new_len + 1) / 2;
    let v_offset = max_d;
    let v_length = 2 * max_d;
    let mut v1 = vec![-1isize; v_length as usize];
    let mut v2 = vec![-1isize; v_length as usize];
    v1[(v_offset + 1) as usize] = 0;
    v2[(v_offset + 1) as usize] = 0;

    let delta = old_len - new_len;
    // With an odd delta the forward path checks for overlap with the reverse
    // path, otherwise the reverse path checks.
    let front = delta % 2 != 0;

    // Diagonals that ran off the edge of the grid are trimmed from the sweep.
    let mut k1_start = 0;
    let mut k1_end = 0;
    let mut k2_start = 0;
    let mut k2_end = 0;

    for d in 0..max_d {
        if ctx.deadline.is_expired() {
            debug!(round = d, old_len, new_len, "bisect deadline elapsed");
            break;
        }

        let mut k1 = -d + k1_start;
        while k1 <= d - k1_end {
            let k1_offset = (v_offset + k1) as usize;
            let mut x1 = if k1 == -d || (k1 != d && v1[k1_offset - 1] < v1[k1_offset + 1]) {
                v1[k1_offset + 1]
            } else {
                v1[k1_offset - 1] + 1
            };
            let mut y1 = x1 - k1;
            while x1 < old_len && y1 < new_len && old[x1 as usize] == new[y1 as usize] {
                x1 += 1;
                y1 += 1;
            }
            v1[k1_offset] = x1;
            if x1 > old_len {
                k1_end += 2;
            } else if y1 > new_len {
                k1_start += 2;
            } else if front {
                let k2_offset = v_offset + delta - k1;
                if k2_offset >= 0 && k2_offset < v_length && v2[k2_offset as usize] != -1 {
                    // Mirror the reverse coordinate onto the forward grid.
                    let x2 = old_len - v2[k2_offset as usize];
                    if x1 >= x2 {
                        return split(old, new, x1 as usize, y1 as usize, ctx);
                    }
                }
            }
            k1 += 2;
        }

        let mut k2 = -d + k2_start;
        while k2 <= d - k2_end {
            let k2_offset = (v_offset + k2) as usize;
            let mut x2 = if k2 == -d || (k2 != d && v2[k2_offset - 1] < v2[k2_offset + 1]) {
                v2[k2_offset + 1]
            } else {
                v2[k2_offset - 1] + 1
            };
            let mut y2 = x2 - k2;
            while x2 < old_len
                && y2 < new_len
                && old[(old_len - x2 - 1) as usize] == new[(new_len - y2 - 1) as usize]
            {
                x2 += 1;
                y2 += 1;
            }
            v2[k2_offset] = x2;
            if x2 > old_len {
                k2_end += 2;
            } else if y2 > new_len {
                k2_start += 2;
            } else if !front {
                let k1_offset = v_offset + delta - k2;
                if k1_offset >= 0 && k1_offset < v_length && v1[k1_offset as usize] != -1 {
                    let x1 = v1[k1_offset as usize];
                    let y1 = v_offset + x1 - k1_offset;
                    if x1 >= old_len - x2 {
                        return split(old, new, x1 as usize, y1 as usize, ctx);
                    }
                }
            }
            k2 += 2;
        }
    }

    vec![Span::delete(old), Span::insert(new)]
}

/// Diff both sides of the split point independently and concatenate.
fn split<T: Symbol>(old: &[T], new: &[T], x: usize, y: usize, ctx: DiffContext) -> Vec<Span<T>> {
    let mut spans = diff_main(&old[..x], &new[..y], ctx);
    spans.extend(diff_main(&old[x..], &new[y..], ctx));
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::Deadline;
    use crate::op::Op;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn render(spans: &[Span<char>]) -> Vec<(Op, String)> {
        spans
            .iter()
            .map(|s| (s.op, s.items.iter().collect()))
            .collect()
    }

    #[test]
    fn finds_minimal_script() {
        let old = chars("cat");
        let new = chars("map");
        let spans = bisect(&old, &new, DiffContext::new(Deadline::none()));
        assert_eq!(
            render(&spans),
            vec![
                (Op::Delete, "c".into()),
                (Op::Insert, "m".into()),
                (Op::Equal, "a".into()),
                (Op::Delete, "t".into()),
                (Op::Insert, "p".into()),
            ]
        );
    }

    #[test]
    fn elapsed_deadline_gives_up() {
        let old = chars("cat");
        let new = chars("map");
        let spans = bisect(&old, &new, DiffContext::new(Deadline::expired()));
        assert_eq!(
            render(&spans),
            vec![(Op::Delete, "cat".into()), (Op::Insert, "map".into())]
        );
    }

    #[test]
    fn disjoint_inputs_give_up() {
        let old = chars("abc");
        let new = chars("xyz");
        let spans = bisect(&old, &new, DiffContext::new(Deadline::none()));
        assert_eq!(
            render(&spans),
            vec![(Op::Delete, "abc".into()), (Op::Insert, "xyz".into())]
        );
    }

    #[test]
    fn works_on_line_symbols() {
        let old = [1u32, 2, 3, 4];
        let new = [1u32, 5, 3, 4, 6];
        let spans = bisect(&old, &new, DiffContext::new(Deadline::none()));
        let old_back: Vec<u32> = spans
            .iter()
            .filter(|s| s.op != Op::Insert)
            .flat_map(|s| s.items.clone())
            .collect();
        let new_back: Vec<u32> = spans
            .iter()
            .filter(|s| s.op != Op::Delete)
            .flat_map(|s| s.items.clone())
            .collect();
        assert_eq!(old_back, old);
        assert_eq!(new_back, new);
    }
}
