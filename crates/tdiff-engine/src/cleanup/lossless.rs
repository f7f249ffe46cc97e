//! Lossless boundary alignment.
//!
//! Single edits surrounded by equalities are slid sideways to the most
//! natural breakpoint. Neither text changes; only where the boundaries fall.

use crate::affix::common_suffix;
use crate::op::{Op, Span};

/// Slide every single edit between two equalities to its best-scoring
/// boundary, e.g. `The c<ins>at c</ins>ame.` becomes `The <ins>cat </ins>came.`
pub(crate) fn cleanup_lossless(spans: &mut Vec<Span<char>>) {
    let mut pointer = 1;
    while pointer + 1 < spans.len() {
        if spans[pointer - 1].op == Op::Equal && spans[pointer + 1].op == Op::Equal {
            let mut equality1 = spans[pointer - 1].items.clone();
            let mut edit = spans[pointer].items.clone();
            let mut equality2 = spans[pointer + 1].items.clone();

            // First shift the edit as far left as possible.
            let offset = common_suffix(&equality1, &edit);
            if offset > 0 {
                let common = edit[edit.len() - offset..].to_vec();
                equality1.truncate(equality1.len() - offset);
                edit.truncate(edit.len() - offset);
                edit.splice(0..0, common.iter().copied());
                equality2.splice(0..0, common);
            }

            // Then step right one character at a time, keeping the best fit.
            // Ties go to the later position.
            let mut best_equality1 = equality1.clone();
            let mut best_edit = edit.clone();
            let mut best_equality2 = equality2.clone();
            let mut best_score =
                boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
            while !edit.is_empty() && !equality2.is_empty() && edit[0] == equality2[0] {
                equality1.push(edit.remove(0));
                edit.push(equality2.remove(0));
                let score = boundary_score(&equality1, &edit) + boundary_score(&edit, &equality2);
                if score >= best_score {
                    best_score = score;
                    best_equality1.clone_from(&equality1);
                    best_edit.clone_from(&edit);
                    best_equality2.clone_from(&equality2);
                }
            }

            if spans[pointer - 1].items != best_equality1 {
                if best_equality1.is_empty() {
                    spans.remove(pointer - 1);
                    pointer -= 1;
                } else {
                    spans[pointer - 1].items = best_equality1;
                }
                spans[pointer].items = best_edit;
                if best_equality2.is_empty() {
                    spans.remove(pointer + 1);
                    pointer = pointer.saturating_sub(1);
                } else {
                    spans[pointer + 1].items = best_equality2;
                }
            }
        }
        pointer += 1;
    }
}

/// Score the junction between `one` (ending) and `two` (starting): 6 for an
/// edge, 5 for a blank line, 4 for a line break, 3 for the end of a sentence,
/// 2 for whitespace, 1 for other punctuation and 0 inside a word.
pub(crate) fn boundary_score(one: &[char], two: &[char]) -> u32 {
    let (Some(&char1), Some(&char2)) = (one.last(), two.first()) else {
        return 6;
    };

    let non_alphanumeric1 = !char1.is_alphanumeric();
    let non_alphanumeric2 = !char2.is_alphanumeric();
    let whitespace1 = non_alphanumeric1 && char1.is_whitespace();
    let whitespace2 = non_alphanumeric2 && char2.is_whitespace();
    let line_break1 = whitespace1 && is_line_break(char1);
    let line_break2 = whitespace2 && is_line_break(char2);
    let blank_line1 = line_break1 && ends_with_blank_line(one);
    let blank_line2 = line_break2 && starts_with_blank_line(two);

    if blank_line1 || blank_line2 {
        5
    } else if line_break1 || line_break2 {
        4
    } else if non_alphanumeric1 && !whitespace1 && whitespace2 {
        3
    } else if whitespace1 || whitespace2 {
        2
    } else if non_alphanumeric1 || non_alphanumeric2 {
        1
    } else {
        0
    }
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// `\n\r?\n` at the very end.
fn ends_with_blank_line(text: &[char]) -> bool {
    text.ends_with(&['\n', '\n']) || text.ends_with(&['\n', '\r', '\n'])
}

/// `\r?\n\r?\n` at the very start.
fn starts_with_blank_line(text: &[char]) -> bool {
    let rest = text.strip_prefix(&['\r']).unwrap_or(text);
    let Some(rest) = rest.strip_prefix(&['\n']) else {
        return false;
    };
    let rest = rest.strip_prefix(&['\r']).unwrap_or(rest);
    rest.starts_with(&['\n'])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn span(op: Op, s: &str) -> Span<char> {
        Span::new(op, chars(s))
    }

    fn ins(s: &str) -> Span<char> {
        span(Op::Insert, s)
    }

    fn eq(s: &str) -> Span<char> {
        span(Op::Equal, s)
    }

    fn aligned(mut spans: Vec<Span<char>>) -> Vec<Span<char>> {
        cleanup_lossless(&mut spans);
        spans
    }

    fn score(one: &str, two: &str) -> u32 {
        boundary_score(&chars(one), &chars(two))
    }

    #[test]
    fn empty_script() {
        assert!(aligned(vec![]).is_empty());
    }

    #[test]
    fn blank_lines() {
        assert_eq!(
            aligned(vec![eq("AAA\r\n\r\nBBB"), ins("\r\nDDD\r\n\r\nBBB"), eq("\r\nEEE")]),
            vec![eq("AAA\r\n\r\n"), ins("BBB\r\nDDD\r\n\r\n"), eq("BBB\r\nEEE")]
        );
    }

    #[test]
    fn line_boundaries() {
        assert_eq!(
            aligned(vec![eq("AAA\r\nBBB"), ins(" DDD\r\nBBB"), eq(" EEE")]),
            vec![eq("AAA\r\n"), ins("BBB DDD\r\n"), eq("BBB EEE")]
        );
    }

    #[test]
    fn word_boundaries() {
        assert_eq!(
            aligned(vec![eq("The c"), ins("ow and the c"), eq("at.")]),
            vec![eq("The "), ins("cow and the "), eq("cat.")]
        );
    }

    #[test]
    fn alphanumeric_boundaries() {
        assert_eq!(
            aligned(vec![eq("The-c"), ins("ow-and-the-c"), eq("at.")]),
            vec![eq("The-"), ins("cow-and-the-"), eq("cat.")]
        );
    }

    #[test]
    fn hitting_the_start() {
        assert_eq!(
            aligned(vec![eq("a"), span(Op::Delete, "a"), eq("ax")]),
            vec![span(Op::Delete, "a"), eq("aax")]
        );
    }

    #[test]
    fn hitting_the_end() {
        assert_eq!(
            aligned(vec![eq("xa"), span(Op::Delete, "a"), eq("a")]),
            vec![eq("xaa"), span(Op::Delete, "a")]
        );
    }

    #[test]
    fn sentence_boundaries() {
        assert_eq!(
            aligned(vec![eq("The xxx. The "), ins("zzz. The "), eq("yyy.")]),
            vec![eq("The xxx."), ins(" The zzz."), eq(" The yyy.")]
        );
    }

    #[test]
    fn scores() {
        assert_eq!(score("", "x"), 6);
        assert_eq!(score("a\n\n", "b"), 5);
        assert_eq!(score("a\n", "\r\n\nb"), 5);
        assert_eq!(score("a\n", "b"), 4);
        assert_eq!(score("end.", " next"), 3);
        assert_eq!(score("a ", "b"), 2);
        assert_eq!(score("a-", "b"), 1);
        assert_eq!(score("ab", "cd"), 0);
    }

    #[test]
    fn blank_line_patterns() {
        assert!(ends_with_blank_line(&chars("x\n\n")));
        assert!(ends_with_blank_line(&chars("x\n\r\n")));
        assert!(!ends_with_blank_line(&chars("x\r\n")));
        assert!(starts_with_blank_line(&chars("\n\nx")));
        assert!(starts_with_blank_line(&chars("\r\n\r\nx")));
        assert!(!starts_with_blank_line(&chars("\r\nx")));
    }
}
